//! Session configuration
//!
//! Supplied once when a session is constructed. Loadable from JSON; any field
//! left out falls back to the defaults of the classic 800x600 game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of obstacle pairs resident in the pool
    pub pair_count: u32,
    pub screen_width: i32,
    pub screen_height: i32,
    pub obstacle_width: i32,
    /// Vertical space between the top and bottom obstacle of a pair
    pub passing_gap: i32,
    pub min_obstacle_height: i32,
    pub starting_lives: u32,

    /// Obstacle scroll per tick (pixels)
    pub scroll_speed: f32,
    /// Side length of the (square) player
    pub player_size: i32,
    /// RNG seed for obstacle generation (random when absent)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: PAIR_COUNT,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            passing_gap: PASSING_GAP,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,
            starting_lives: STARTING_LIVES,
            scroll_speed: SCROLL_SPEED,
            player_size: PLAYER_SIZE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check every rule a running session relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pair_count", self.pair_count as i64)?;
        positive("screen_width", self.screen_width as i64)?;
        positive("screen_height", self.screen_height as i64)?;
        positive("obstacle_width", self.obstacle_width as i64)?;
        positive("passing_gap", self.passing_gap as i64)?;
        positive("min_obstacle_height", self.min_obstacle_height as i64)?;
        positive("starting_lives", self.starting_lives as i64)?;
        positive("player_size", self.player_size as i64)?;

        at_most("screen_width", self.screen_width as i64)?;
        at_most("screen_height", self.screen_height as i64)?;
        at_most("obstacle_width", self.obstacle_width as i64)?;
        at_most("passing_gap", self.passing_gap as i64)?;
        at_most("min_obstacle_height", self.min_obstacle_height as i64)?;

        if !self.scroll_speed.is_finite()
            || self.scroll_speed <= 0.0
            || self.scroll_speed > MAX_DIMENSION as f32
        {
            return Err(ConfigError::InvalidScrollSpeed(self.scroll_speed));
        }

        if self.pair_spacing() == 0 {
            return Err(ConfigError::TooManyPairs {
                pair_count: self.pair_count,
                screen_width: self.screen_width,
            });
        }

        // Top heights are drawn from [min, min + screen_height/2); the range
        // must be non-empty and the tallest draw must still leave a bottom.
        let span = self.screen_height as i64 + 2 * OFFSET as i64;
        let tallest_top = self.min_obstacle_height as i64 + (self.screen_height / 2) as i64;
        if self.screen_height / 2 == 0 || tallest_top + self.passing_gap as i64 > span {
            return Err(ConfigError::GapDoesNotFit {
                min_height: self.min_obstacle_height,
                passing_gap: self.passing_gap,
                span,
            });
        }

        if self.player_size > self.screen_width || self.player_size > self.screen_height {
            return Err(ConfigError::PlayerDoesNotFit {
                width: self.screen_width,
                height: self.screen_height,
                size: self.player_size,
            });
        }

        Ok(())
    }

    /// Horizontal distance between consecutive pair anchors
    ///
    /// Zero when the pairs cannot be spread across the screen width.
    pub fn pair_spacing(&self) -> i32 {
        match i32::try_from(self.pair_count) {
            Ok(pairs) if pairs > 0 => self.screen_width / pairs,
            _ => 0,
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn positive(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn at_most(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value > MAX_DIMENSION as i64 {
        return Err(ConfigError::TooLarge {
            field,
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
