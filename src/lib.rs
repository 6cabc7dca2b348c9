//! Never Give Up - a side-scrolling obstacle dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, obstacle pool, collisions, run state)
//! - `session`: Top-level run object and the host-facing interface
//! - `scheduler`: Fixed timestep update/render loop
//! - `config`: Session configuration with validation
//! - `error`: Configuration and simulation error types

pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SessionError, SimError};
pub use scheduler::{Clock, FixedStep, Frontend, SystemClock, run};
pub use session::{RenderableState, Session};
pub use sim::{RunPhase, RunSummary};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Logical simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_STEP: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

    /// Obstacles extend this far past the top/bottom screen edges to hide pop-in
    pub const OFFSET: i32 = 30;

    /// Upper bound for any configured size or speed; keeps obstacle
    /// positions exact as `f32` and clear of `i32` overflow
    pub const MAX_DIMENSION: i32 = 1 << 22;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Obstacle defaults
    pub const PAIR_COUNT: u32 = 6;
    pub const OBSTACLE_WIDTH: i32 = 60;
    pub const MIN_OBSTACLE_HEIGHT: i32 = 100;
    pub const PASSING_GAP: i32 = 100;
    /// Horizontal scroll per tick (pixels)
    pub const SCROLL_SPEED: f32 = 4.0;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 24;
    pub const STARTING_LIVES: u32 = 3;
}
