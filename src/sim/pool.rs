//! Obstacle pool backed by a fixed-capacity ring
//!
//! The pool holds `pair_count` obstacle pairs in `2 * pair_count` slots and is
//! full between ticks. Pairs scroll left; once the leftmost pair has slid half
//! its width past the screen edge it is removed and a freshly generated pair is
//! appended after the rightmost one, so a bounded pool reads as an endless
//! stream. The backing storage is allocated once and never resized.

use glam::IVec2;
use rand::Rng;

use super::entity::Obstacle;
use crate::config::GameConfig;
use crate::consts::OFFSET;
use crate::error::SimError;

/// Fixed-capacity FIFO of obstacles
///
/// `front` is the oldest occupied slot, `rear` the newest. Unoccupied slots
/// are always `None`.
#[derive(Debug, Clone)]
struct ObstacleRing {
    slots: Box<[Option<Obstacle>]>,
    front: usize,
    rear: usize,
    len: usize,
}

impl ObstacleRing {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            front: 0,
            rear: capacity.saturating_sub(1),
            len: 0,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn free(&self) -> usize {
        self.capacity() - self.len
    }

    fn enqueue(&mut self, obstacle: Obstacle) -> Result<(), SimError> {
        if self.free() == 0 {
            return Err(SimError::RingFull {
                capacity: self.capacity(),
            });
        }
        self.rear = (self.rear + 1) % self.capacity();
        self.slots[self.rear] = Some(obstacle);
        self.len += 1;
        Ok(())
    }

    fn dequeue(&mut self) -> Result<Obstacle, SimError> {
        if self.len == 0 {
            return Err(SimError::RingEmpty);
        }
        let obstacle = self.slots[self.front].take().ok_or(SimError::RingEmpty)?;
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
        Ok(obstacle)
    }

    fn back(&self) -> Option<&Obstacle> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.rear].as_ref()
    }

    /// Occupied slots, oldest first
    fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        let (wrapped, head) = self.slots.split_at(self.front);
        head.iter().chain(wrapped).filter_map(Option::as_ref)
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        let (wrapped, head) = self.slots.split_at_mut(self.front);
        head.iter_mut().chain(wrapped).filter_map(Option::as_mut)
    }
}

/// Generation parameters shared by every pair
#[derive(Debug, Clone, Copy)]
struct PairLayout {
    screen_height: i32,
    obstacle_width: i32,
    min_height: i32,
    passing_gap: i32,
    /// Horizontal distance between consecutive pair anchors
    spacing: i32,
    scroll_speed: f32,
}

/// Endless stream of obstacle pairs from a bounded pool
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    ring: ObstacleRing,
    pair_count: u32,
    layout: PairLayout,
    next_id: u32,
}

impl ObstaclePool {
    /// Fill the pool left to right, the first pair just past the right edge
    ///
    /// `config` must already have passed `GameConfig::validate`.
    pub(crate) fn initialize<R: Rng + ?Sized>(
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut pool = Self {
            ring: ObstacleRing::with_capacity(2 * config.pair_count as usize),
            pair_count: config.pair_count,
            layout: PairLayout {
                screen_height: config.screen_height,
                obstacle_width: config.obstacle_width,
                min_height: config.min_obstacle_height,
                passing_gap: config.passing_gap,
                spacing: config.pair_spacing(),
                scroll_speed: config.scroll_speed,
            },
            next_id: 0,
        };

        for i in 0..config.pair_count as i32 {
            let x = config.screen_width + i * pool.layout.spacing;
            pool.spawn_pair(x as f32, rng)?;
        }

        Ok(pool)
    }

    /// Scroll every resident obstacle one tick
    pub fn advance(&mut self) {
        for obstacle in self.ring.iter_mut() {
            obstacle.advance();
        }
    }

    /// Replace expired pairs at the head with new pairs at the tail
    ///
    /// Returns the number of pairs recycled, which is the number of pairs the
    /// player got past this tick.
    pub fn recycle_expired<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u32, SimError> {
        let mut recycled = 0;
        while recycled < self.pair_count && self.head_expired() {
            let tail = self.ring.back().ok_or(SimError::RingEmpty)?;
            let anchor = tail.exact_x() + self.layout.spacing as f32;
            let (top, bottom) = self.dequeue_pair()?;
            log::debug!(
                "Recycling pair {}/{} at x={} -> x={}",
                top.id(),
                bottom.id(),
                top.pos.x,
                anchor
            );
            self.spawn_pair(anchor, rng)?;
            recycled += 1;
        }
        Ok(recycled)
    }

    /// Resident pairs, left to right
    pub fn pairs(&self) -> impl Iterator<Item = (&Obstacle, &Obstacle)> {
        let mut obstacles = self.ring.iter();
        std::iter::from_fn(move || Some((obstacles.next()?, obstacles.next()?)))
    }

    pub fn pairs_mut(&mut self) -> impl Iterator<Item = (&mut Obstacle, &mut Obstacle)> {
        let mut obstacles = self.ring.iter_mut();
        std::iter::from_fn(move || Some((obstacles.next()?, obstacles.next()?)))
    }

    /// Resident obstacles, left to right, top before bottom
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.ring.iter()
    }

    /// Number of complete pairs currently resident
    pub fn resident_pairs(&self) -> usize {
        self.ring.len() / 2
    }

    pub fn pair_count(&self) -> u32 {
        self.pair_count
    }

    /// Total obstacle slots
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    fn head_expired(&self) -> bool {
        self.pairs()
            .next()
            .is_some_and(|(top, bottom)| top.is_expired() || bottom.is_expired())
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn dequeue_pair(&mut self) -> Result<(Obstacle, Obstacle), SimError> {
        if self.ring.len() < 2 {
            return Err(SimError::RingEmpty);
        }
        Ok((self.ring.dequeue()?, self.ring.dequeue()?))
    }

    /// Append one pair anchored at `x`, which may carry a sub-pixel remainder
    fn spawn_pair<R: Rng + ?Sized>(&mut self, x: f32, rng: &mut R) -> Result<(), SimError> {
        if self.ring.free() < 2 {
            return Err(SimError::RingFull {
                capacity: self.ring.capacity(),
            });
        }

        let layout = self.layout;
        let top_height =
            rng.random_range(layout.min_height..layout.min_height + layout.screen_height / 2);
        let top = Obstacle::new(
            self.next_id(),
            IVec2::new(0, -OFFSET),
            IVec2::new(layout.obstacle_width, top_height),
            layout.scroll_speed,
        )
        .placed_at(x);

        let bottom_y = top_height - OFFSET + layout.passing_gap;
        let bottom_height = layout.screen_height + OFFSET - bottom_y;
        let bottom = Obstacle::new(
            self.next_id(),
            IVec2::new(0, bottom_y),
            IVec2::new(layout.obstacle_width, bottom_height),
            layout.scroll_speed,
        )
        .placed_at(x);

        self.ring.enqueue(top)?;
        self.ring.enqueue(bottom)?;
        Ok(())
    }
}
