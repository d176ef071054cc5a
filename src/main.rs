//! Acorn Dash entry point
//!
//! Headless session controller: drives the simulation at a fixed timestep
//! with a scripted demo pilot, owns the lives counter, and rebuilds the
//! session whenever the core requests a restart. A windowed build would swap
//! the pilot for real input and walk `draw_order` to paint each frame.

use std::fs;

use acorn_dash::assets::Placeholders;
use acorn_dash::audio::{Cue, CuePlayer, cue_for};
use acorn_dash::consts::{SIM_DT, STARTING_LIVES};
use acorn_dash::sim::{GameState, ShiftDir, TickInput, tick};
use acorn_dash::tuning::Tuning;

/// Cue player for headless runs: cues go to the log instead of a speaker
#[derive(Default)]
struct LogCues;

impl CuePlayer for LogCues {
    fn play(&mut self, cue: Cue) {
        log::info!("cue: {cue:?}");
    }
}

fn load_tuning() -> Tuning {
    match fs::read_to_string("tuning.json") {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(tuning) => {
                log::info!("loaded tuning.json");
                tuning
            }
            Err(err) => {
                log::warn!("tuning.json ignored: {err}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

/// Scripted demo pilot: runs right, hops now and then, and wanders across
/// the planes on a fixed schedule
fn demo_input(ticks: u64) -> TickInput {
    let secs = ticks as f32 * SIM_DT;
    TickInput {
        right: true,
        jump: ticks % 150 == 0,
        shift: match (secs as u32) % 12 {
            4 => Some(ShiftDir::Up),
            8 => Some(ShiftDir::Down),
            _ => None,
        }
        .filter(|_| ticks % 60 == 0),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xACD5);

    let tuning = load_tuning();
    let mut images = Placeholders::new();
    let mut cues = LogCues;

    let mut lives = STARTING_LIVES;
    let mut state = GameState::new(seed, tuning.clone(), &mut images);
    log::info!("session start, seed {seed}, {lives} lives");

    let max_ticks = (120.0 / SIM_DT) as u64;
    let mut total_ticks = 0u64;

    while total_ticks < max_ticks {
        let input = demo_input(state.time_ticks);
        tick(&mut state, &input, SIM_DT, &mut images);
        total_ticks += 1;

        for event in state.take_events() {
            log::debug!("event: {event:?}");
            if let Some(cue) = cue_for(&event) {
                cues.play(cue);
            }
        }

        if state.restart_requested {
            lives -= 1;
            log::info!(
                "run over after {:.1}s, {lives} lives left",
                state.time_ticks as f32 * SIM_DT
            );
            if lives == 0 {
                log::info!("game over");
                break;
            }
            state = GameState::new(seed.wrapping_add(lives as u64), tuning.clone(), &mut images);
        }
    }

    println!(
        "simulated {:.1}s, lost {} of {STARTING_LIVES} lives (last run ended on {:?})",
        total_ticks as f32 * SIM_DT,
        STARTING_LIVES - lives,
        state.player.plane,
    );
}
