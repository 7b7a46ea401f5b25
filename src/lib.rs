//! Highway Dash - a straight-highway arcade racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, AI, race state)
//! - `input`: Closed key enum and held/pressed key-state table
//!
//! Rendering and window/input binding are external collaborators: they read
//! the per-tick [`sim::FrameSnapshot`] and feed key events into
//! [`input::InputState`]. The simulation never calls out.

pub mod input;
pub mod sim;

pub use input::{InputState, Key};
pub use sim::{GameMode, GameState, tick};

/// Game configuration constants
pub mod consts {
    /// Maximum delta-time fed to a tick (clamps integration after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Simulation unit scale: positions advance by `vel * dt * TIME_SCALE`.
    /// Part of the physics contract; any reimplementation must use the same
    /// constant for behavior parity.
    pub const TIME_SCALE: f32 = 60.0;

    /// Track dimensions
    pub const ROAD_WIDTH: f32 = 400.0;
    /// Base track length before the per-level increment
    pub const BASE_LENGTH: f32 = 3000.0;
    /// Extra track length per level
    pub const LEVEL_INCREMENT: f32 = 2000.0;
    /// Finish line sits this far before the end of the track
    pub const FINISH_MARGIN: f32 = 200.0;
    /// Cars bounce off the road edge this far inside the half-width
    pub const EDGE_MARGIN: f32 = 20.0;

    /// Physics
    pub const AIR_RESISTANCE: f32 = 0.98;
    /// Lateral velocity multiplier on an edge bounce (inverts and damps)
    pub const BOUNCE_DAMPING: f32 = -0.3;
    /// Scalar speed multiplier on an edge bounce
    pub const BOUNCE_SPEED_LOSS: f32 = 0.5;
    /// Steering is applied as `steering * STEER_VELOCITY_FACTOR` per call
    pub const STEER_VELOCITY_FACTOR: f32 = 0.3;
    /// Rotation change per steering call (degrees)
    pub const STEER_ROTATION_STEP: f32 = 2.0;
    /// Rotation relaxation toward zero per call (degrees)
    pub const CENTER_ROTATION_STEP: f32 = 1.0;
    /// Heading clamp (degrees)
    pub const MAX_ROTATION: f32 = 15.0;
    /// Minimum speed below which steering has no effect
    pub const MIN_STEER_SPEED: f32 = 1.0;
    /// Minimum speed below which braking has no effect
    pub const MIN_BRAKE_SPEED: f32 = 0.1;

    /// Collision
    pub const CAR_COLLISION_DISTANCE: f32 = 40.0;
    pub const COIN_PICKUP_RADIUS: f32 = 30.0;

    /// Coins
    pub const COIN_Z: f32 = 10.0;
    /// First coin row
    pub const COIN_START_Y: f32 = 200.0;
    /// No coins within this distance of the track end
    pub const COIN_END_MARGIN: f32 = 500.0;
    /// Longitudinal gap between coins is uniform in this range
    pub const COIN_GAP_MIN: f32 = 200.0;
    pub const COIN_GAP_MAX: f32 = 500.0;

    /// Levels
    pub const MAX_LEVEL: u32 = 5;

    /// Lap reset positions: player restarts each lap here
    pub const LAP_RESET_Y: f32 = 50.0;
    /// AI cars restart each lap at a random y in this range
    pub const AI_LAP_RESET_MIN_Y: f32 = 50.0;
    pub const AI_LAP_RESET_MAX_Y: f32 = 150.0;

    /// AI throttle: `base + difficulty * k1 + level * k2`
    pub const AI_THROTTLE_BASE: f32 = 0.15;
    pub const AI_THROTTLE_PER_DIFFICULTY: f32 = 0.01;
    pub const AI_THROTTLE_PER_LEVEL: f32 = 0.01;
    /// Corrective nudge toward track center
    pub const AI_NUDGE_STRENGTH: f32 = 0.2;
    /// Ticks between corrective nudges for one AI car
    pub const AI_NUDGE_PERIOD: u32 = 30;
    /// Per-car phase stagger so AI cars do not react in lockstep
    pub const AI_NUDGE_STAGGER: u32 = 7;
    /// Proportional restoring gain outside the inner band
    pub const AI_RESTORE_GAIN: f32 = 0.1;

    /// Seconds spent on the Game Complete screen before the auto new-game reset
    pub const AUTO_RESTART_SECONDS: f32 = 3.0;

    /// HUD speed display multiplier (sim units to mph)
    pub const SPEED_MPH_FACTOR: f32 = 15.0;
}
