//! Error types
//!
//! Configuration errors are fatal to session construction and never reach the
//! running loop. Simulation errors mean the obstacle ring lost track of its
//! capacity and the run must stop.

use thiserror::Error;

/// Rejected session configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A count or dimension that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    /// A size beyond what the integer pixel grid can hold
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i32,
    },

    #[error("scroll_speed must be a finite positive number, got {0}")]
    InvalidScrollSpeed(f32),

    /// Pair spacing (`screen_width / pair_count`) would be zero
    #[error("pair_count {pair_count} exceeds screen_width {screen_width}")]
    TooManyPairs { pair_count: u32, screen_width: i32 },

    /// The tallest top obstacle plus the gap leaves no room for a bottom obstacle
    #[error(
        "min_obstacle_height {min_height} + screen_height/2 + passing_gap {passing_gap} \
         exceeds the vertical span {span}"
    )]
    GapDoesNotFit {
        min_height: i32,
        passing_gap: i32,
        span: i64,
    },

    #[error("screen {width}x{height} cannot hold a player of size {size}")]
    PlayerDoesNotFit { width: i32, height: i32, size: i32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Capacity accounting defects in the obstacle ring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("obstacle ring is at full capacity ({capacity})")]
    RingFull { capacity: usize },

    #[error("obstacle ring is empty")]
    RingEmpty,
}

/// Failure while building or running a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
}
