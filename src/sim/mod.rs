//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (left to right, by obstacle ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{check_all_pairs, check_hit};
pub use entity::{Aabb, Bounds, Obstacle, ObstacleStatus, Player};
pub use pool::ObstaclePool;
pub use state::{GameState, RunPhase, RunState, RunSummary};
pub use tick::{TickInput, TickOutcome, tick};
