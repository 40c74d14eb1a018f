//! Headless autoplay demo
//!
//! Runs the simulation at the fixed tick rate with a simple autopilot on
//! the paddle, logging notable events. Useful for profiling the sim and
//! for eyeballing game balance without a renderer attached.

use brickline::Progress;
use brickline::consts::{FIELD_W, TICK_RATE};
use brickline::sim::{GamePhase, GameState, PaddleTouch, SoundCue, TickInput, demo_levels, tick};

/// Ticks before the demo gives up on a run (10 minutes of sim time)
const MAX_TICKS: u32 = 10 * 60 * TICK_RATE;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("autoplay demo starting, seed {seed}");

    let mut state = GameState::new(seed, demo_levels());
    let mut progress = Progress::new();
    let mut levels_cleared = 0u32;

    for frame in 0..MAX_TICKS {
        let input = autopilot(&state);
        let events = tick(&mut state, &input);

        for cue in events.sounds() {
            log::debug!("frame {frame}: sound {cue:?}");
        }
        if events.has_sound(SoundCue::BallLost) {
            log::info!("frame {frame}: ball lost, {} lives left", state.lives());
        }
        if let Some(level) = events.level_completed {
            levels_cleared += 1;
            progress.record(level);
            log::info!("frame {frame}: level {level} cleared");
        }

        if state.phase == GamePhase::GameOver {
            log::info!("frame {frame}: game over on level {}", state.level_index());
            break;
        }
    }

    progress.finish_run(levels_cleared);
    match progress.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("progress serialization failed: {err}"),
    }
}

/// Track the lowest live ball with the paddle and launch as soon as a
/// serve is waiting. Not meant to be good, just enough to keep a run
/// going.
fn autopilot(state: &GameState) -> TickInput {
    let target_x = state
        .balls
        .iter()
        .filter(|b| !b.body.hidden && !b.frozen)
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
        .map(|b| b.body.center_x())
        .unwrap_or(FIELD_W / 2.0);

    TickInput {
        touch: Some(PaddleTouch {
            x: target_x,
            pressed: true,
            power: 1.0,
        }),
        launch: state.phase == GamePhase::Serve,
    }
}
