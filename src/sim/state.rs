//! Game state and core simulation types
//!
//! One [`GameState`] owns everything: cars, track, counters, mode. The tick
//! function is its sole mutator; renderers consume the read-only
//! [`FrameSnapshot`] between ticks.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AI_CAR_COUNT, AiController};
use super::car::Car;
use super::track::Track;
use crate::consts::*;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen (initial)
    Menu,
    /// Lap count / difficulty selection
    CustomRaceMenu,
    /// Active race
    Racing,
    /// Race suspended, toggled from Racing
    Paused,
    /// Terminal per-race outcome (win, loss or crash)
    Finished,
    /// All levels beaten
    GameComplete,
}

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Numeric tier feeding the AI throttle formula
    pub fn tier(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Custom race menu selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSettings {
    /// Requested lap count (1, 3 or 5 from the menu)
    pub laps: u32,
    pub difficulty: Difficulty,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            laps: 1,
            difficulty: Difficulty::Easy,
        }
    }
}

/// Start positions: player first, then the three AI cars
pub const START_POSITIONS: [Vec3; 1 + AI_CAR_COUNT] = [
    Vec3::new(0.0, 0.0, 5.0),
    Vec3::new(-40.0, 50.0, 5.0),
    Vec3::new(40.0, 100.0, 5.0),
    Vec3::new(-20.0, 150.0, 5.0),
];

/// Body colors matching the start positions
pub const CAR_COLORS: [[f32; 3]; 1 + AI_CAR_COUNT] = [
    [1.0, 0.0, 0.0], // player: red
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
];

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG: coin layouts and AI lap resets
    pub rng: Pcg32,
    pub mode: GameMode,
    /// Current level, 1..=MAX_LEVEL (display clamps at MAX_LEVEL)
    pub level: u32,
    /// Coins collected across the whole session
    pub coins_collected: u32,
    pub races_won: u32,
    /// Custom race menu selections
    pub settings: RaceSettings,
    /// Lap target for the active race
    pub total_laps: u32,
    /// 1-based lap the player is on
    pub current_lap: u32,
    /// Simulated seconds since race start
    pub race_elapsed: f32,
    /// Simulated seconds spent on the Game Complete screen
    pub complete_elapsed: f32,
    pub track: Track,
    /// Cars, player first
    pub cars: Vec<Car>,
    pub ai: AiController,
    /// Render-only day/night toggle, orthogonal to the state machine
    pub night_mode: bool,
    /// Render-only camera toggle
    pub first_person: bool,
    /// Set by Cancel from the top-level menu; the frame driver exits on it
    pub quit_requested: bool,
    /// Global tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session at the menu
    pub fn new(seed: u64) -> Self {
        let cars = START_POSITIONS
            .iter()
            .zip(CAR_COLORS)
            .enumerate()
            .map(|(i, (&pos, color))| Car::new(pos, color, i == 0))
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Menu,
            level: 1,
            coins_collected: 0,
            races_won: 0,
            settings: RaceSettings::default(),
            total_laps: 1,
            current_lap: 1,
            race_elapsed: 0.0,
            complete_elapsed: 0.0,
            track: Track::for_level(1),
            cars,
            ai: AiController::new(),
            night_mode: false,
            first_person: false,
            quit_requested: false,
            time_ticks: 0,
        }
    }

    /// The player car
    pub fn player(&self) -> &Car {
        &self.cars[0]
    }

    pub fn player_mut(&mut self) -> &mut Car {
        &mut self.cars[0]
    }

    /// The AI cars
    pub fn ai_cars(&self) -> &[Car] {
        &self.cars[1..]
    }

    /// Initialize a race and enter Racing: lap counters, timers, track and
    /// coin regeneration, car resets. Shared by menu start, custom start and
    /// the unconditional restart key.
    pub fn start_race(&mut self, laps: u32) {
        self.total_laps = laps;
        self.current_lap = 1;
        self.race_elapsed = 0.0;
        self.track = Track::for_level(self.level);
        self.track.regenerate_coins(&mut self.rng);

        for (car, &pos) in self.cars.iter_mut().zip(START_POSITIONS.iter()) {
            car.reset_for_race(pos);
        }
        self.ai.reset();

        self.mode = GameMode::Racing;
        log::info!(
            "race started: level {}, {} laps, difficulty {}",
            self.level,
            self.total_laps,
            self.settings.difficulty.as_str()
        );
    }

    /// Full new-game reset: level 1, zeroed session counters, back to Menu.
    pub fn reset_to_new_game(&mut self) {
        log::info!("new game: resetting to level 1");
        self.level = 1;
        self.coins_collected = 0;
        self.races_won = 0;
        self.complete_elapsed = 0.0;
        self.track = Track::for_level(self.level);
        self.mode = GameMode::Menu;
    }

    /// Player rank: 1 plus the number of non-crashed AI cars ahead
    pub fn position_rank(&self) -> u32 {
        let player_y = self.player().pos.y;
        1 + self
            .ai_cars()
            .iter()
            .filter(|c| !c.crashed && c.pos.y > player_y)
            .count() as u32
    }

    /// Build the read-only per-frame view for the renderer.
    pub fn snapshot(&self) -> FrameSnapshot {
        let player = self.player();
        FrameSnapshot {
            mode: self.mode,
            night_mode: self.night_mode,
            cars: self
                .cars
                .iter()
                .map(|c| CarSnapshot {
                    x: c.pos.x,
                    y: c.pos.y,
                    z: c.pos.z,
                    rotation: c.rotation,
                    color: c.color,
                    crashed: c.crashed,
                })
                .collect(),
            coins: self
                .track
                .coins
                .iter()
                .map(|c| CoinSnapshot {
                    x: c.x,
                    y: c.y,
                    z: c.z,
                    visible: !c.collected,
                })
                .collect(),
            hud: Hud {
                speed_mph: (player.speed * SPEED_MPH_FACTOR) as u32,
                current_lap: self.current_lap,
                total_laps: self.total_laps,
                coins: self.coins_collected,
                level: self.level,
                max_level: MAX_LEVEL,
                // Negative remaining distance clamps to zero at display time
                distance_remaining: (self.track.finish_line - player.pos.y).max(0.0),
                race_elapsed: self.race_elapsed,
                position: self.position_rank(),
                car_count: self.cars.len() as u32,
            },
            camera: CameraTarget {
                pos: player.pos,
                rotation: player.rotation,
                first_person: self.first_person,
            },
        }
    }
}

/// Per-car render data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rotation: f32,
    pub color: [f32; 3],
    pub crashed: bool,
}

/// Per-coin render data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visible: bool,
}

/// HUD scalars, pre-clamped for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hud {
    pub speed_mph: u32,
    pub current_lap: u32,
    pub total_laps: u32,
    pub coins: u32,
    pub level: u32,
    pub max_level: u32,
    pub distance_remaining: f32,
    pub race_elapsed: f32,
    /// 1-based rank among all cars
    pub position: u32,
    pub car_count: u32,
}

/// Camera follow target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraTarget {
    pub pos: Vec3,
    pub rotation: f32,
    pub first_person: bool,
}

/// Read-only view of one frame, consumed by the rendering collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub mode: GameMode,
    pub night_mode: bool,
    pub cars: Vec<CarSnapshot>,
    pub coins: Vec<CoinSnapshot>,
    pub hud: Hud,
    pub camera: CameraTarget,
}
