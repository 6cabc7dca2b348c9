//! Simulated entities: the player and the scrolling obstacles
//!
//! Positions are integer screen pixels anchored at the top-left corner of the
//! entity's bounding box. Sizes are fixed at construction.

use glam::{IVec2, Vec2};
use serde::Serialize;

/// Axis-aligned bounding box with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aabb {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Aabb {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Overlap on both axes; touching edges count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }
}

/// Clamping rectangle for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub max_width: i32,
    pub max_height: i32,
}

impl Bounds {
    pub fn new(max_width: i32, max_height: i32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Keep a box of `size` anchored at `pos` fully inside the bounds
    pub fn clamp(&self, pos: IVec2, size: IVec2) -> IVec2 {
        let max = IVec2::new(self.max_width - size.x, self.max_height - size.y).max(IVec2::ZERO);
        pos.clamp(IVec2::ZERO, max)
    }
}

/// Whether an obstacle can still register a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObstacleStatus {
    /// Eligible to register a hit
    Functional,
    /// Already hit; never eligible again
    Consumed,
}

/// One half (top or bottom) of an obstacle pair
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    id: u32,
    pub pos: IVec2,
    size: IVec2,
    /// Only `vel.x` is used: the leftward scroll per tick
    vel: Vec2,
    /// Fractional part of the true x position, in `[0, 1)`
    sub_px: f32,
    status: ObstacleStatus,
}

impl Obstacle {
    pub fn new(id: u32, pos: IVec2, size: IVec2, scroll_speed: f32) -> Self {
        Self {
            id,
            pos,
            size,
            vel: Vec2::new(scroll_speed, 0.0),
            sub_px: 0.0,
            status: ObstacleStatus::Functional,
        }
    }

    /// Place at a sub-pixel x position
    pub(crate) fn placed_at(mut self, x: f32) -> Self {
        let whole = x.floor();
        self.pos.x = whole as i32;
        self.sub_px = x - whole;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// True x position including the sub-pixel remainder
    pub fn exact_x(&self) -> f32 {
        self.pos.x as f32 + self.sub_px
    }

    pub fn status(&self) -> ObstacleStatus {
        self.status
    }

    pub fn is_functional(&self) -> bool {
        self.status == ObstacleStatus::Functional
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Mark as hit. Returns false if it was already consumed.
    pub(crate) fn consume(&mut self) -> bool {
        match self.status {
            ObstacleStatus::Functional => {
                self.status = ObstacleStatus::Consumed;
                true
            }
            ObstacleStatus::Consumed => false,
        }
    }

    /// Scroll one tick to the left; the pixel x is the floor of the true x
    pub fn advance(&mut self) {
        let x = self.exact_x() - self.vel.x;
        let whole = x.floor();
        self.pos.x = whole as i32;
        self.sub_px = x - whole;
    }

    /// Half or more of the obstacle has left the screen
    pub fn is_expired(&self) -> bool {
        self.pos.x < -self.size.x / 2
    }
}

/// The pointer-driven entity
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: IVec2,
    size: IVec2,
    bounds: Bounds,
}

impl Player {
    pub fn new(pos: IVec2, size: IVec2, bounds: Bounds) -> Self {
        let mut player = Self {
            pos,
            size,
            bounds,
        };
        player.clamp_to_bounds();
        player
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Centre the player on a pointer sample, then clamp
    pub fn follow_pointer(&mut self, pointer: IVec2) {
        let half = self.size / 2;
        self.pos = IVec2::new(
            pointer.x.saturating_sub(half.x),
            pointer.y.saturating_sub(half.y),
        );
        self.clamp_to_bounds();
    }

    pub fn clamp_to_bounds(&mut self) {
        self.pos = self.bounds.clamp(self.pos, self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap_inclusive_edges() {
        let a = Aabb::new(IVec2::new(0, 0), IVec2::new(10, 10));
        // Sharing the right edge exactly
        let b = Aabb::new(IVec2::new(10, 0), IVec2::new(10, 10));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = Aabb::new(IVec2::new(11, 0), IVec2::new(10, 10));
        assert!(!a.overlaps(&c));

        let d = Aabb::new(IVec2::new(0, 11), IVec2::new(10, 10));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_obstacle_scrolls_left() {
        let mut obstacle = Obstacle::new(0, IVec2::new(100, -30), IVec2::new(60, 200), 4.0);
        obstacle.advance();
        assert_eq!(obstacle.pos, IVec2::new(96, -30));

        let mut slow = Obstacle::new(1, IVec2::new(10, 0), IVec2::new(60, 200), 1.5);
        slow.advance();
        assert_eq!(slow.pos.x, 8);
        assert_eq!(slow.exact_x(), 8.5);
        slow.advance();
        assert_eq!(slow.pos.x, 7);
    }

    #[test]
    fn test_fractional_scroll_is_even_across_the_edge() {
        let mut right = Obstacle::new(0, IVec2::new(10, 0), IVec2::new(60, 200), 1.5);
        let mut left = Obstacle::new(1, IVec2::new(-10, 0), IVec2::new(60, 200), 1.5);
        for _ in 0..4 {
            right.advance();
            left.advance();
        }
        // 4 * 1.5 = 6 px on either side of x = 0
        assert_eq!(right.pos.x, 4);
        assert_eq!(left.pos.x, -16);

        let mut crossing = Obstacle::new(2, IVec2::new(1, 0), IVec2::new(60, 200), 1.5);
        crossing.advance();
        assert_eq!(crossing.exact_x(), -0.5);
        assert_eq!(crossing.pos.x, -1);
    }

    #[test]
    fn test_sub_pixel_speed_keeps_moving() {
        let mut obstacle = Obstacle::new(0, IVec2::new(2, 0), IVec2::new(60, 200), 0.5);
        let mut xs = Vec::new();
        for _ in 0..8 {
            obstacle.advance();
            xs.push(obstacle.pos.x);
        }
        assert_eq!(xs, vec![1, 1, 0, 0, -1, -1, -2, -2]);

        while !obstacle.is_expired() {
            obstacle.advance();
        }
        assert_eq!(obstacle.pos.x, -31);
    }

    #[test]
    fn test_placed_at_splits_whole_and_fraction() {
        let obstacle = Obstacle::new(0, IVec2::new(0, -30), IVec2::new(60, 200), 0.5)
            .placed_at(-2.25);
        assert_eq!(obstacle.pos, IVec2::new(-3, -30));
        assert_eq!(obstacle.exact_x(), -2.25);
    }

    #[test]
    fn test_obstacle_expiry_threshold() {
        let mut obstacle = Obstacle::new(0, IVec2::new(-30, 0), IVec2::new(60, 200), 4.0);
        assert!(!obstacle.is_expired());
        obstacle.pos.x = -31;
        assert!(obstacle.is_expired());
    }

    #[test]
    fn test_consume_is_one_way() {
        let mut obstacle = Obstacle::new(0, IVec2::ZERO, IVec2::new(60, 200), 4.0);
        assert!(obstacle.is_functional());
        assert!(obstacle.consume());
        assert_eq!(obstacle.status(), ObstacleStatus::Consumed);
        assert!(!obstacle.consume());
        assert!(!obstacle.is_functional());
    }

    #[test]
    fn test_player_follows_pointer_centred() {
        let mut player = Player::new(IVec2::new(400, 300), IVec2::splat(24), Bounds::new(800, 600));
        player.follow_pointer(IVec2::new(400, 300));
        assert_eq!(player.pos, IVec2::new(388, 288));
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let mut player = Player::new(IVec2::new(400, 300), IVec2::splat(24), Bounds::new(800, 600));

        player.follow_pointer(IVec2::new(-50, -50));
        assert_eq!(player.pos, IVec2::ZERO);

        player.follow_pointer(IVec2::new(5000, 5000));
        assert_eq!(player.pos, IVec2::new(776, 576));

        player.follow_pointer(IVec2::new(i32::MAX, 10));
        assert_eq!(player.pos, IVec2::new(776, 0));

        player.follow_pointer(IVec2::new(i32::MIN, i32::MIN));
        assert_eq!(player.pos, IVec2::ZERO);
    }
}
