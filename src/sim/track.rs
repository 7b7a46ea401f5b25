//! Track geometry and coin placement
//!
//! Track length is a pure function of the level; the finish line and coin
//! layout derive from it. Centralizing the computation here keeps every call
//! site (race init, HUD, lap checks) reading the same numbers.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Track length for a level: `BASE_LENGTH + level * LEVEL_INCREMENT`
#[inline]
pub fn track_length(level: u32) -> f32 {
    BASE_LENGTH + level as f32 * LEVEL_INCREMENT
}

/// A collectible coin on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Monotonic: flips false -> true once, reset only by regeneration
    pub collected: bool,
}

/// The highway for the active level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub level: u32,
    pub length: f32,
    /// Crossing this longitudinal position completes a lap
    pub finish_line: f32,
    pub coins: Vec<Coin>,
}

impl Track {
    /// Build the track for a level. Coins are generated separately at race
    /// start via [`Track::regenerate_coins`].
    pub fn for_level(level: u32) -> Self {
        let length = track_length(level);
        Self {
            level,
            length,
            finish_line: length - FINISH_MARGIN,
            coins: Vec::new(),
        }
    }

    /// Replace the coin set with a fresh randomized layout: rows spaced
    /// uniformly in [COIN_GAP_MIN, COIN_GAP_MAX) along the road, each at a
    /// random lateral offset within the inner two thirds.
    pub fn regenerate_coins(&mut self, rng: &mut Pcg32) {
        self.coins.clear();

        let mut y = COIN_START_Y;
        while y < self.length - COIN_END_MARGIN {
            let x = rng.random_range(-ROAD_WIDTH / 3.0..ROAD_WIDTH / 3.0);
            self.coins.push(Coin {
                x,
                y,
                z: COIN_Z,
                collected: false,
            });
            y += rng.random_range(COIN_GAP_MIN..COIN_GAP_MAX);
        }

        log::debug!(
            "generated {} coins for level {} (length {})",
            self.coins.len(),
            self.level,
            self.length
        );
    }

    /// Coins still visible on the road
    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }

    /// Coins collected from the current layout
    pub fn collected_coins(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }
}
