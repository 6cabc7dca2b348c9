//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one logical step:
//! input, scroll, recycle, collide, then score/lives.

use glam::IVec2;

use super::collision::check_all_pairs;
use super::state::GameState;
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest pointer sample (screen pixels), if it moved since the last tick
    pub pointer: Option<IVec2>,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pairs that left the screen and were recycled
    pub pairs_passed: u32,
    /// The player hit at least one functional obstacle
    pub hit: bool,
    /// This tick moved the run into `GameOver`
    pub run_ended: bool,
}

/// Advance the game state by one fixed timestep
///
/// A finished run is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<TickOutcome, SimError> {
    if state.run.is_game_over() {
        return Ok(TickOutcome::default());
    }

    state.time_ticks += 1;

    if let Some(pointer) = input.pointer {
        state.player.follow_pointer(pointer);
    }

    state.pool.advance();
    let pairs_passed = state.recycle_expired()?;

    let hit = check_all_pairs(&state.player, &mut state.pool);
    let run_ended = state.run.apply(pairs_passed, hit);

    if hit {
        log::debug!(
            "Hit at tick {} ({} lives left)",
            state.time_ticks,
            state.run.lives()
        );
    }

    Ok(TickOutcome {
        pairs_passed,
        hit,
        run_ended,
    })
}
