//! Top-level run object
//!
//! A `Session` owns one run from construction to `GameOver` and is the only
//! surface the host talks to: pointer samples go in, renderable snapshots come
//! out, and a one-shot hook reports the end of the run. A new run means a new
//! session.

use glam::IVec2;
use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{SessionError, SimError};
use crate::sim::{
    GameState, Obstacle, Player, RunPhase, RunSummary, TickInput, TickOutcome, tick,
};

/// Read-only view of the run for one presentation frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderableState {
    pub player: Player,
    /// Left to right, top before bottom within each pair
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub lives: u32,
    pub is_game_over: bool,
}

impl RenderableState {
    /// Status bar text for the host's labels
    pub fn hud(&self) -> (String, String) {
        (format!("Lives: {}", self.lives), format!("Score: {}", self.score))
    }
}

type RunEndedHook = Box<dyn FnOnce(RunSummary)>;

/// One run of the game
pub struct Session {
    state: GameState,
    /// Latest pointer sample not yet applied to the player
    pending_pointer: Option<IVec2>,
    on_run_ended: Option<RunEndedHook>,
}

impl Session {
    /// Validate the config and set up a fresh run
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        let state = GameState::new(config)?;
        log::info!(
            "Session started: seed {}, {} pairs, {} lives",
            state.seed,
            state.config.pair_count,
            state.config.starting_lives
        );
        Ok(Self {
            state,
            pending_pointer: None,
            on_run_ended: None,
        })
    }

    /// Register the hook fired once when the run enters `GameOver`
    pub fn on_run_ended(&mut self, hook: impl FnOnce(RunSummary) + 'static) {
        self.on_run_ended = Some(Box::new(hook));
    }

    /// Buffer a pointer sample; only the latest one before a tick is used
    pub fn on_pointer_moved(&mut self, x: i32, y: i32) {
        self.pending_pointer = Some(IVec2::new(x, y));
    }

    /// Advance the run by exactly one fixed step
    pub fn on_logical_tick(&mut self) -> Result<TickOutcome, SimError> {
        let input = TickInput {
            pointer: self.pending_pointer.take(),
        };

        let outcome = tick(&mut self.state, &input).inspect_err(|e| {
            log::error!("Run aborted at tick {}: {}", self.state.time_ticks, e);
        })?;

        if outcome.run_ended {
            let summary = self.summary();
            log::info!(
                "GAMEOVER after {} ticks, score {}",
                summary.ticks,
                summary.score
            );
            if let Some(hook) = self.on_run_ended.take() {
                hook(summary);
            }
        }

        Ok(outcome)
    }

    pub fn renderable_state(&self) -> RenderableState {
        RenderableState {
            player: self.state.player.clone(),
            obstacles: self.state.pool.obstacles().cloned().collect(),
            score: self.state.run.score(),
            lives: self.state.run.lives(),
            is_game_over: self.is_game_over(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state.run.phase() == RunPhase::GameOver
    }

    pub fn summary(&self) -> RunSummary {
        self.state.summary()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("pending_pointer", &self.pending_pointer)
            .field("on_run_ended", &self.on_run_ended.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(seed: u64, lives: u32) -> Session {
        Session::new(GameConfig {
            seed: Some(seed),
            starting_lives: lives,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = Session::new(GameConfig {
            screen_height: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_latest_pointer_sample_wins() {
        let mut session = session(1, 3);
        session.on_pointer_moved(10, 10);
        session.on_pointer_moved(600, 100);
        // Not applied until the next tick
        assert_eq!(session.renderable_state().player.pos, IVec2::new(400, 300));

        session.on_logical_tick().unwrap();
        assert_eq!(session.renderable_state().player.pos, IVec2::new(588, 88));

        // No new sample: player stays put
        session.on_logical_tick().unwrap();
        assert_eq!(session.renderable_state().player.pos, IVec2::new(588, 88));
    }

    #[test]
    fn test_renderable_state_snapshot() {
        let session = session(2, 3);
        let view = session.renderable_state();
        assert_eq!(view.obstacles.len(), 12);
        assert_eq!(view.score, 0);
        assert_eq!(view.lives, 3);
        assert!(!view.is_game_over);
        assert!(view.obstacles.windows(2).all(|w| w[0].id() < w[1].id()));
        assert_eq!(view.hud(), ("Lives: 3".to_string(), "Score: 0".to_string()));

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"is_game_over\":false"));
    }

    #[test]
    fn test_run_ended_hook_fires_once() {
        let mut session = session(3, 2);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        session.on_run_ended(move |summary| sink.borrow_mut().push(summary));

        session.on_pointer_moved(400, 0);
        let mut lives = vec![session.renderable_state().lives];
        for _ in 0..1000 {
            let outcome = session.on_logical_tick().unwrap();
            if outcome.hit {
                lives.push(session.renderable_state().lives);
            }
        }

        assert_eq!(lives, vec![2, 1, 0]);
        assert!(session.is_game_over());
        let fired = fired.borrow();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].score, 0);
        assert_eq!(fired[0].lives, 0);
        assert_eq!(fired[0].phase, RunPhase::GameOver);
        assert_eq!(fired[0].ticks, 131);
    }
}
