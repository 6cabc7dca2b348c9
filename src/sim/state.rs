//! Run state machine and the complete simulation state
//!
//! Score only goes up, lives only go down, and `GameOver` is terminal: once
//! lives reach zero nothing in the run changes again.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Player};
use super::pool::ObstaclePool;
use crate::config::GameConfig;
use crate::error::{SessionError, SimError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Final (or current) result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub lives: u32,
    /// Logical ticks simulated
    pub ticks: u64,
    pub phase: RunPhase,
}

/// Score and lives bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunState {
    score: u64,
    lives: u32,
    phase: RunPhase,
}

impl RunState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            phase: if lives == 0 {
                RunPhase::GameOver
            } else {
                RunPhase::Playing
            },
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Feed one tick's events into the state machine
    ///
    /// Each passed pair scores one point; a collision costs one life no
    /// matter how many obstacles it involved. Returns true on the tick the run
    /// enters `GameOver`.
    pub fn apply(&mut self, pairs_passed: u32, hit: bool) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.score += pairs_passed as u64;

        if hit {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.phase = RunPhase::GameOver;
                return true;
            }
        }

        false
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub player: Player,
    pub pool: ObstaclePool,
    pub run: RunState,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Validate the config and lay out the opening obstacle field
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = ObstaclePool::initialize(&config, &mut rng)?;

        let bounds = Bounds::new(config.screen_width, config.screen_height);
        let player = Player::new(
            IVec2::new(config.screen_width / 2, config.screen_height / 2),
            IVec2::splat(config.player_size),
            bounds,
        );

        Ok(Self {
            seed,
            run: RunState::new(config.starting_lives),
            config,
            player,
            pool,
            time_ticks: 0,
            rng,
        })
    }

    /// Recycle expired pairs using the run's RNG
    pub(crate) fn recycle_expired(&mut self) -> Result<u32, SimError> {
        self.pool.recycle_expired(&mut self.rng)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.run.score(),
            lives: self.run.lives(),
            ticks: self.time_ticks,
            phase: self.run.phase(),
        }
    }
}
