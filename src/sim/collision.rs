//! Collision detection between the player and obstacles
//!
//! A hit consumes the obstacle in the same call, so an overlap that lasts for
//! several ticks only ever registers once. Consumed obstacles keep scrolling
//! and are recycled like any other.

use super::entity::{Obstacle, Player};
use super::pool::ObstaclePool;

/// Check the player against one obstacle, consuming it on a hit
///
/// Returns true only if the obstacle was still functional and the two
/// bounding boxes overlap (edges inclusive).
pub fn check_hit(player: &Player, obstacle: &mut Obstacle) -> bool {
    if !obstacle.is_functional() {
        return false;
    }
    if !player.aabb().overlaps(&obstacle.aabb()) {
        return false;
    }
    obstacle.consume()
}

/// Check the player against every resident pair
///
/// Every obstacle is tested, so all obstacles overlapped on this tick are
/// consumed together and count as one collision.
pub fn check_all_pairs(player: &Player, pool: &mut ObstaclePool) -> bool {
    let mut hit = false;
    for (top, bottom) in pool.pairs_mut() {
        hit |= check_hit(player, top);
        hit |= check_hit(player, bottom);
    }
    hit
}
