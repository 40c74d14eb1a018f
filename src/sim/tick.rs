//! Fixed timestep simulation tick
//!
//! One `tick` call advances the game by a single frame: phase machine,
//! then (while playing) the fixed update order of brick grid, ball set,
//! paddle (which runs lasers), and power-up set. Win is evaluated before
//! loss when both would hold in the same frame.

use glam::Vec2;

use crate::consts::BALL_SIZE;

use super::events::{FrameEvents, SoundCue};
use super::level::load_level;
use super::powerups::PowerupKind;
use super::state::{GamePhase, GameState, TickInput, serve_position};

/// Advance the game state by one fixed timestep, returning the frame's
/// externally-consumed events.
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameEvents {
    let mut events = FrameEvents::new();

    if let Some(touch) = input.touch {
        state.paddle.touch(touch.x, touch.pressed, touch.power);
    }

    match state.phase {
        GamePhase::Loading => {
            let level = state.levels[state.level_index as usize].clone();
            load_level(&mut state.bricks, &level, &mut state.rng);
            state.paddle.reset();
            state.balls.clear();
            state.balls.clear_fire();
            state.balls.reset_ramp();
            state.powerups.clear();
            spawn_serve_ball(state);
            state.phase = GamePhase::Serve;
            log::info!("level {} ready", state.level_index);
        }

        GamePhase::Serve => {
            let mut spawns = Vec::new();
            state
                .paddle
                .update(&mut state.balls, &mut state.bricks, &mut spawns, &mut events);

            if input.launch {
                release_caught_balls(state);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            // Fixed update order: bricks, balls, paddle (lasers), powerups
            state.bricks.tick_particles();

            let mut spawns: Vec<Vec2> = Vec::new();
            state
                .balls
                .update(&mut state.bricks, &mut spawns, &mut events);
            state
                .paddle
                .update(&mut state.balls, &mut state.bricks, &mut spawns, &mut events);

            for center in spawns {
                state.powerups.spawn(center, &mut state.rng);
            }

            let paddle_body = state.paddle.body;
            let collected = state.powerups.update(&paddle_body, &mut events);
            for kind in collected {
                apply_powerup(state, kind, &mut events);
            }

            if input.launch {
                release_caught_balls(state);
            }

            // Win takes priority over loss within the same frame
            if state.bricks.is_complete() {
                events.push_sound(SoundCue::LevelComplete);
                events.level_completed = Some(state.level_index);
                state.phase = GamePhase::LevelCleared;
                state.delay_ticks = state.tuning.level_clear_ticks;
                log::info!("level {} cleared", state.level_index);
            } else if state.balls.count() == 0 {
                state.lives = state.lives.saturating_sub(1);
                events.haptic_pulse = true;
                if state.lives == 0 {
                    events.push_sound(SoundCue::GameOver);
                    state.phase = GamePhase::GameOver;
                    log::info!("game over at level {}", state.level_index);
                } else {
                    state.phase = GamePhase::GetReady;
                    state.delay_ticks = state.tuning.get_ready_ticks;
                }
            }
        }

        GamePhase::LevelCleared => {
            state.delay_ticks = state.delay_ticks.saturating_sub(1);
            if state.delay_ticks == 0 {
                state.level_index += 1;
                if state.has_more_levels() {
                    state.phase = GamePhase::Loading;
                } else {
                    // Run complete
                    events.push_sound(SoundCue::GameOver);
                    state.phase = GamePhase::GameOver;
                    log::info!("all levels cleared");
                }
            }
        }

        GamePhase::GetReady => {
            state.delay_ticks = state.delay_ticks.saturating_sub(1);
            if state.delay_ticks == 0 {
                spawn_serve_ball(state);
                state.phase = GamePhase::Serve;
            }
        }

        GamePhase::GameOver => {}
    }

    events
}

/// Spawn one frozen ball riding the paddle's top center
fn spawn_serve_ball(state: &mut GameState) {
    let paddle = state.paddle.body;
    let pos = serve_position(&paddle, Vec2::splat(BALL_SIZE));
    state.balls.add(pos.x, pos.y, &mut state.rng);
    state.balls.set_frozen(true);
    for ball in state.balls.iter_mut().filter(|b| !b.body.hidden) {
        ball.carry_offset = paddle.size.x / 2.0 - ball.body.size.x / 2.0;
    }
}

/// Unfreeze and relaunch every caught ball (serve launch, magnet release)
fn release_caught_balls(state: &mut GameState) {
    let mut launched = Vec::new();
    for (i, ball) in state
        .balls
        .iter_mut()
        .enumerate()
        .filter(|(_, b)| !b.body.hidden && b.frozen)
    {
        ball.frozen = false;
        launched.push(i);
    }
    // Relaunch outside the iteration: launching draws from the shared RNG
    for i in launched {
        if let Some(ball) = state.balls.iter_mut().nth(i) {
            ball.launch(&mut state.rng);
        }
    }
}

/// Dispatch exactly one collected power-up effect
fn apply_powerup(state: &mut GameState, kind: PowerupKind, events: &mut FrameEvents) {
    let tuning = state.tuning;
    match kind {
        PowerupKind::Magnet => state.paddle.grant_magnet(tuning.magnet_ticks),
        PowerupKind::ExpandPaddle => state.paddle.expand(),
        PowerupKind::ShrinkPaddle => state.paddle.shrink(),
        PowerupKind::Laser => {
            state
                .paddle
                .grant_laser(tuning.laser_window_ticks, tuning.laser_burst_ticks);
        }
        PowerupKind::ExtraLife => {
            state.lives = state.lives.saturating_add(1);
            events.push_sound(SoundCue::ExtraLife);
        }
        PowerupKind::ExtraBalls => {
            let paddle = state.paddle.body;
            let pos = serve_position(&paddle, Vec2::splat(BALL_SIZE));
            state.balls.add(pos.x, pos.y, &mut state.rng);
            state.balls.add(pos.x, pos.y, &mut state.rng);
        }
        PowerupKind::SpeedUp => state.balls.scale_speeds(1.25),
        PowerupKind::SpeedDown => state.balls.scale_speeds(0.8),
        PowerupKind::Fireball => {
            state.balls.set_fire_all(tuning.fire_ticks);
            events.push_sound(SoundCue::FireballCollected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Level, demo_levels};
    use crate::sim::state::PaddleTouch;

    fn launch_input() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, demo_levels());
        tick(&mut state, &TickInput::default()); // Loading -> Serve
        tick(&mut state, &launch_input()); // Serve -> Playing
        state
    }

    #[test]
    fn test_loading_to_serve_to_playing() {
        let mut state = GameState::new(42, demo_levels());
        assert_eq!(state.phase, GamePhase::Loading);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Serve);
        assert_eq!(state.balls.count(), 1);
        assert!(state.balls.iter().next().expect("ball").frozen);

        // No launch: stays in serve
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Serve);

        tick(&mut state, &launch_input());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.balls.iter().next().expect("ball").frozen);
    }

    #[test]
    fn test_win_priority_and_level_advance() {
        let mut state = playing_state();
        // Clear the board by hand: win must outrank the simultaneous
        // loss of the last ball
        for row in 0..state.bricks.rows() {
            for col in 0..state.bricks.cols() {
                while state.bricks.cell(row, col).alive() {
                    state.bricks.mark_hit(row, col);
                }
            }
        }
        state.balls.clear();

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelCleared);
        assert_eq!(events.level_completed, Some(0));
        assert!(events.has_sound(SoundCue::LevelComplete));
        assert_eq!(state.lives(), crate::consts::START_LIVES);

        // Delay counts down in frames, then the next level loads
        for _ in 0..state.tuning.level_clear_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.level_index(), 1);
        assert_eq!(state.phase, GamePhase::Loading);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Serve);
        assert!(state.bricks.begin_total() > 0);
    }

    #[test]
    fn test_life_loss_and_respawn() {
        let mut state = playing_state();
        state.balls.clear();

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GetReady);
        assert_eq!(state.lives(), crate::consts::START_LIVES - 1);
        assert!(events.haptic_pulse);

        for _ in 0..state.tuning.get_ready_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Serve);
        assert_eq!(state.balls.count(), 1);
    }

    #[test]
    fn test_game_over_when_lives_exhausted() {
        let mut state = playing_state();
        state.lives = 1;
        state.balls.clear();

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.has_sound(SoundCue::GameOver));

        // Game over is terminal
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_extra_balls_powerup() {
        let mut state = playing_state();
        assert_eq!(state.balls.count(), 1);
        state.balls.add(240.0, 400.0, &mut state.rng);
        assert_eq!(state.balls.count(), 2);

        let mut events = FrameEvents::new();
        apply_powerup(&mut state, PowerupKind::ExtraBalls, &mut events);
        assert_eq!(state.balls.count(), 4);
    }

    #[test]
    fn test_extra_life_powerup() {
        let mut state = playing_state();
        let mut events = FrameEvents::new();
        apply_powerup(&mut state, PowerupKind::ExtraLife, &mut events);
        assert_eq!(state.lives(), crate::consts::START_LIVES + 1);
        assert!(events.has_sound(SoundCue::ExtraLife));
    }

    #[test]
    fn test_fireball_powerup_arms_all_balls() {
        let mut state = playing_state();
        let mut events = FrameEvents::new();
        apply_powerup(&mut state, PowerupKind::Fireball, &mut events);
        assert!(state.balls.iter().all(|b| b.body.hidden || b.on_fire()));
        assert!(events.has_sound(SoundCue::FireballCollected));
    }

    #[test]
    fn test_touch_reaches_paddle() {
        let mut state = playing_state();
        let before = state.paddle.body.center_x();
        let input = TickInput {
            touch: Some(PaddleTouch {
                x: before + 200.0,
                pressed: true,
                power: 1.0,
            }),
            launch: false,
        };
        tick(&mut state, &input);
        assert!(state.paddle.body.center_x() > before);
    }

    #[test]
    fn test_determinism() {
        let levels = demo_levels();
        let mut a = GameState::new(99, levels.clone());
        let mut b = GameState::new(99, levels);

        let inputs = [
            TickInput::default(),
            launch_input(),
            TickInput {
                touch: Some(PaddleTouch {
                    x: 120.0,
                    pressed: true,
                    power: 0.7,
                }),
                launch: false,
            },
            TickInput::default(),
        ];
        for input in &inputs {
            for _ in 0..30 {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.balls.count(), b.balls.count());
        assert_eq!(a.paddle.body.pos.x, b.paddle.body.pos.x);
        let (ba, bb) = (
            a.balls.iter().next().expect("ball"),
            b.balls.iter().next().expect("ball"),
        );
        assert_eq!(ba.body.pos, bb.body.pos);
        assert_eq!(ba.body.vel, bb.body.vel);
    }

    #[test]
    fn test_empty_breakable_level_wins_immediately() {
        // A board of only solid bricks is complete from the start
        let levels = vec![Level::from_rows(&["ZZZ"]), Level::from_rows(&["XXX"])];
        let mut state = GameState::new(7, levels);
        tick(&mut state, &TickInput::default());
        let events = tick(&mut state, &launch_input());
        assert_eq!(state.phase, GamePhase::Playing);
        let events2 = tick(&mut state, &TickInput::default());
        assert!(events.level_completed.is_some() || events2.level_completed.is_some());
    }
}
