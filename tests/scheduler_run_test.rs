//! End-to-end runs through the scheduler with a scripted clock and frontend

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glam::IVec2;
use never_give_up::consts::SIM_STEP;
use never_give_up::{Clock, Frontend, GameConfig, RenderableState, RunPhase, Session, run};

/// Clock that advances a fixed amount on every read
struct SteppingClock {
    now: Duration,
    per_read: Duration,
}

impl SteppingClock {
    fn new(per_read: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            per_read,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&mut self) -> Duration {
        let now = self.now;
        self.now += self.per_read;
        now
    }
}

/// Frontend that parks the pointer and records every frame
#[derive(Default)]
struct RecordingFrontend {
    pointer: Option<IVec2>,
    frames: Vec<(u32, u64, bool)>,
    stop_after: Option<usize>,
}

impl Frontend for RecordingFrontend {
    fn poll_pointer(&mut self) -> Option<IVec2> {
        self.pointer
    }

    fn draw(&mut self, view: &RenderableState) {
        assert_eq!(view.obstacles.len(), 12, "pool must be full between ticks");
        self.frames.push((view.lives, view.score, view.is_game_over));
    }

    fn stop_requested(&self) -> bool {
        self.stop_after.is_some_and(|n| self.frames.len() >= n)
    }
}

fn session(seed: u64) -> Session {
    Session::new(GameConfig {
        seed: Some(seed),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_run_until_game_over() {
    let mut session = session(21);
    let ended = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&ended);
    session.on_run_ended(move |summary| {
        assert_eq!(summary.score, 0);
        counter.set(counter.get() + 1);
    });

    // One step per loop iteration
    let mut clock = SteppingClock::new(SIM_STEP);
    let mut frontend = RecordingFrontend {
        pointer: Some(IVec2::new(400, 0)),
        ..Default::default()
    };

    let summary = run(&mut session, &mut clock, &mut frontend).unwrap();

    assert_eq!(summary.phase, RunPhase::GameOver);
    assert_eq!(summary.lives, 0);
    assert_eq!(summary.ticks, 164);
    assert_eq!(ended.get(), 1);

    let mut lives: Vec<u32> = frontend.frames.iter().map(|f| f.0).collect();
    lives.dedup();
    assert_eq!(lives, vec![3, 2, 1, 0]);

    // The final frame shows the terminal state and nothing is drawn after it
    assert_eq!(frontend.frames.last(), Some(&(0, 0, true)));
    assert_eq!(frontend.frames.iter().filter(|f| f.2).count(), 1);
}

#[test]
fn test_stall_runs_catch_up_ticks_before_one_draw() {
    let mut session = session(22);
    // Each iteration sees five steps of wall time
    let mut clock = SteppingClock::new(SIM_STEP * 5);
    let mut frontend = RecordingFrontend {
        stop_after: Some(10),
        ..Default::default()
    };

    let summary = run(&mut session, &mut clock, &mut frontend).unwrap();

    assert_eq!(frontend.frames.len(), 10);
    assert_eq!(summary.ticks, 50);
    assert_eq!(summary.phase, RunPhase::Playing);
}

#[test]
fn test_frozen_clock_draws_without_ticking() {
    let mut session = session(23);
    let mut clock = SteppingClock::new(Duration::ZERO);
    let mut frontend = RecordingFrontend {
        stop_after: Some(25),
        ..Default::default()
    };

    let summary = run(&mut session, &mut clock, &mut frontend).unwrap();

    assert_eq!(frontend.frames.len(), 25);
    assert_eq!(summary.ticks, 0);
}

#[test]
fn test_game_over_mid_burst_drops_remaining_steps() {
    let mut session = Session::new(GameConfig {
        seed: Some(24),
        starting_lives: 1,
        ..Default::default()
    })
    .unwrap();
    // A single huge stall covers the first hit at tick 97 and far beyond
    let mut clock = SteppingClock::new(SIM_STEP * 500);
    let mut frontend = RecordingFrontend {
        pointer: Some(IVec2::new(400, 0)),
        ..Default::default()
    };

    let summary = run(&mut session, &mut clock, &mut frontend).unwrap();

    assert_eq!(summary.phase, RunPhase::GameOver);
    assert_eq!(summary.ticks, 97);
    assert_eq!(frontend.frames, vec![(0, 0, true)]);
}
