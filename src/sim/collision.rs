//! Car-car collision and player-coin proximity checks
//!
//! Both are plain Euclidean distance thresholds in the road plane (x, y);
//! the fixed z height never participates.

use super::car::Car;
use super::track::Coin;
use crate::consts::*;

/// Two cars collide when their center distance drops below
/// [`CAR_COLLISION_DISTANCE`].
pub fn cars_collide(a: &Car, b: &Car) -> bool {
    let dx = a.pos.x - b.pos.x;
    let dy = a.pos.y - b.pos.y;
    (dx * dx + dy * dy).sqrt() < CAR_COLLISION_DISTANCE
}

/// Mark every uncollected coin within [`COIN_PICKUP_RADIUS`] of the player
/// as collected. Returns how many were picked up this tick. Runs after
/// position integration, player car only.
pub fn collect_coins(player: &Car, coins: &mut [Coin]) -> u32 {
    debug_assert!(player.is_player);

    let mut picked_up = 0;
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        let dx = player.pos.x - coin.x;
        let dy = player.pos.y - coin.y;
        if (dx * dx + dy * dy).sqrt() < COIN_PICKUP_RADIUS {
            coin.collected = true;
            picked_up += 1;
        }
    }

    if picked_up > 0 {
        log::debug!("picked up {picked_up} coin(s)");
    }
    picked_up
}
