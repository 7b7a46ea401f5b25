//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped per-frame timestep, simulated time only (no wall clock)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod car;
pub mod collision;
pub mod state;
pub mod tick;
pub mod track;

pub use ai::{AI_CAR_COUNT, AiController};
pub use car::{Car, CarTuning};
pub use collision::{cars_collide, collect_coins};
pub use state::{
    CAR_COLORS, CameraTarget, CarSnapshot, CoinSnapshot, Difficulty, FrameSnapshot, GameMode,
    GameState, Hud, RaceSettings, START_POSITIONS,
};
pub use tick::tick;
pub use track::{Coin, Track, track_length};
