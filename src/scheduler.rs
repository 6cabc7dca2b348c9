//! Fixed timestep update/render scheduler
//!
//! Wall-clock time is accumulated and converted into whole logical steps at
//! `TICKS_PER_SECOND`. A slow frame produces several catch-up ticks before the
//! next draw; no step is ever skipped. Exactly one draw follows each batch.

use std::time::{Duration, Instant};

use glam::IVec2;

use crate::consts::SIM_STEP;
use crate::error::SimError;
use crate::session::{RenderableState, Session};
use crate::sim::RunSummary;

/// Converts elapsed wall-clock time into whole fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    /// Time accumulated but not yet consumed by a step (always < `step`)
    accumulator: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_STEP)
    }
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed time and return how many whole steps are now due
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let due = self.accumulator.as_nanos() / self.step.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.accumulator -= self.step * due;
        due
    }

    /// Fraction of a step accumulated but not yet run, in `[0, 1)`
    pub fn fraction(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.step.as_secs_f64()
    }
}

/// Monotonic time source for the scheduler
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Host side of the loop: input in, frames out
pub trait Frontend {
    /// Latest pointer position, if it moved since the last poll
    fn poll_pointer(&mut self) -> Option<IVec2> {
        None
    }

    /// Present one frame
    fn draw(&mut self, view: &RenderableState);

    /// Host wants the loop to stop (window closed, process exiting)
    fn stop_requested(&self) -> bool {
        false
    }
}

/// Drive a session until the run ends or the host asks to stop
///
/// Returns the run summary; its phase tells the two endings apart. A capacity
/// error in the simulation aborts the loop immediately.
pub fn run<C, F>(
    session: &mut Session,
    clock: &mut C,
    frontend: &mut F,
) -> Result<RunSummary, SimError>
where
    C: Clock + ?Sized,
    F: Frontend + ?Sized,
{
    let mut stepper = FixedStep::default();
    let mut last = clock.now();
    let mut frames: u64 = 0;

    log::info!(
        "Scheduler running at {:.1} ticks/s",
        1.0 / stepper.step().as_secs_f64()
    );

    loop {
        if frontend.stop_requested() {
            log::info!("Stop requested after {} frames", frames);
            break;
        }

        if let Some(pointer) = frontend.poll_pointer() {
            session.on_pointer_moved(pointer.x, pointer.y);
        }

        let now = clock.now();
        let due = stepper.accumulate(now.saturating_sub(last));
        last = now;

        if due > 1 {
            log::trace!("Catching up {} ticks", due);
        }
        for _ in 0..due {
            session.on_logical_tick()?;
            if session.is_game_over() {
                break;
            }
        }

        frontend.draw(&session.renderable_state());
        frames += 1;

        if session.is_game_over() {
            break;
        }
    }

    Ok(session.summary())
}
