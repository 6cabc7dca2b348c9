//! Never Give Up - headless native runner
//!
//! Runs one session at the fixed tick rate with a scripted pointer that sweeps
//! up and down the screen, logging the status bar whenever it changes.
//!
//! Usage: `never-give-up [config.json]`

use std::time::Duration;

use anyhow::{Context, Result};
use glam::IVec2;
use never_give_up::{Frontend, GameConfig, RenderableState, Session, SystemClock, run};

/// Give up after this long if the sweep keeps dodging
const MAX_RUN_TIME: Duration = Duration::from_secs(120);
/// Approximate presentation cadence
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Frontend that plays by sweeping the pointer and prints the HUD
struct ScriptedFrontend {
    screen: IVec2,
    frames: u64,
    max_frames: u64,
    hud: (String, String),
}

impl ScriptedFrontend {
    fn new(config: &GameConfig) -> Self {
        Self {
            screen: IVec2::new(config.screen_width, config.screen_height),
            frames: 0,
            max_frames: MAX_RUN_TIME.as_millis() as u64 / FRAME_TIME.as_millis() as u64,
            hud: (String::new(), String::new()),
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_pointer(&mut self) -> Option<IVec2> {
        let t = self.frames as f32 * 0.02;
        let y = (0.5 + 0.45 * t.sin()) * self.screen.y as f32;
        Some(IVec2::new(self.screen.x / 3, y as i32))
    }

    fn draw(&mut self, view: &RenderableState) {
        let hud = view.hud();
        if hud != self.hud {
            log::info!("{} | {}", hud.0, hud.1);
            self.hud = hud;
        }
        self.frames += 1;
        // Stand-in for vsync
        std::thread::sleep(FRAME_TIME);
    }

    fn stop_requested(&self) -> bool {
        self.frames >= self.max_frames
    }
}

fn main() {
    env_logger::init();
    log::info!("Never Give Up (native) starting...");

    if let Err(e) = play() {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn play() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            GameConfig::load(&path).with_context(|| format!("loading config {path}"))?
        }
        None => GameConfig::default(),
    };

    let mut session = Session::new(config).context("starting session")?;
    session.on_run_ended(|summary| {
        println!("GAMEOVER\nScore: {}", summary.score);
    });

    let mut frontend = ScriptedFrontend::new(session.config());
    let summary = run(&mut session, &mut SystemClock::default(), &mut frontend)
        .context("simulation aborted")?;

    if !session.is_game_over() {
        println!("Stopped\nScore: {} (lives left: {})", summary.score, summary.lives);
    }
    Ok(())
}
