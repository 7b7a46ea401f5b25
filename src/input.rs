//! Key state sampled by the simulation tick
//!
//! The windowing collaborator translates raw key events into [`Key`] values
//! and calls [`InputState::key_down`] / [`InputState::key_up`]. The tick
//! samples held state for continuous controls (throttle, steering) and
//! edge-triggered "pressed" state for state-machine transitions. Unrecognized
//! raw keys are simply never translated, so they are no-ops by construction.

use serde::{Deserialize, Serialize};

/// Closed set of game keys. Indexes the fixed-size state table, so a `match`
/// over keys is exhaustiveness-checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(usize)]
pub enum Key {
    /// Forward acceleration (held)
    Throttle,
    /// Brake (held)
    Brake,
    /// Steer toward the left edge (held)
    SteerLeft,
    /// Steer toward the right edge (held)
    SteerRight,
    /// Pause toggle while racing
    Pause,
    /// First-person / chase camera toggle
    Camera,
    /// Restart the race from any state
    Restart,
    /// Day/night toggle (render-only)
    Night,
    /// Start a race, or acknowledge the game-complete screen
    Start,
    /// Open the custom race menu from the main menu
    CustomMenu,
    /// Back out / escape
    Cancel,
    /// Custom menu: 1 lap
    LapsShort,
    /// Custom menu: 3 laps
    LapsMedium,
    /// Custom menu: 5 laps
    LapsLong,
    /// Custom menu: easy difficulty
    DifficultyEasy,
    /// Custom menu: medium difficulty
    DifficultyMedium,
    /// Custom menu: hard difficulty
    DifficultyHard,
}

/// Number of keys in the closed set
pub const KEY_COUNT: usize = 17;

impl Key {
    /// All keys, for iteration in drivers and tests
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Throttle,
        Key::Brake,
        Key::SteerLeft,
        Key::SteerRight,
        Key::Pause,
        Key::Camera,
        Key::Restart,
        Key::Night,
        Key::Start,
        Key::CustomMenu,
        Key::Cancel,
        Key::LapsShort,
        Key::LapsMedium,
        Key::LapsLong,
        Key::DifficultyEasy,
        Key::DifficultyMedium,
        Key::DifficultyHard,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size key-state table: most recent key-down/key-up wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputState {
    /// Key is currently held
    held: [bool; KEY_COUNT],
    /// Key went down since the last [`InputState::end_tick`]
    pressed: [bool; KEY_COUNT],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: [false; KEY_COUNT],
            pressed: [false; KEY_COUNT],
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event. Auto-repeat (down while already held) does
    /// not re-trigger the pressed edge.
    pub fn key_down(&mut self, key: Key) {
        let i = key.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    /// Record a key-up event.
    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Key is currently held (continuous controls)
    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Key went down since the last tick (edge-triggered transitions)
    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Any key at all went down since the last tick
    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }

    /// Clear edge-triggered state. The frame driver calls this once after
    /// each tick; held state persists until the matching key-up.
    pub fn end_tick(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}
