//! Game state and the phase machine's data
//!
//! `GameState` owns every top-level collection, the seeded RNG, and the
//! run bookkeeping (lives, level index, phase delays). There are no
//! ambient globals: everything the simulation touches hangs off this
//! struct and is threaded by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::Tuning;

use super::balls::BallSet;
use super::bricks::BrickGrid;
use super::entity::Body;
use super::level::Level;
use super::paddle::Paddle;
use super::powerups::PowerupSet;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Loading the current level into the grid
    Loading,
    /// Ball riding the paddle, waiting for launch input
    Serve,
    /// Active gameplay
    Playing,
    /// Win delay: celebratory pause before advancing the level
    LevelCleared,
    /// Lose-a-life delay before the respawned serve
    GetReady,
    /// Run ended
    GameOver,
}

/// One input sample from the external touch/sensor layer (pre-scaled to
/// playfield coordinates). Last write wins within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleTouch {
    pub x: f32,
    pub pressed: bool,
    /// Press intensity/duration ratio, 0.0..=1.0
    pub power: f32,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest paddle touch sample, if any arrived this frame
    pub touch: Option<PaddleTouch>,
    /// Launch serve / release magnet-caught balls
    pub launch: bool,
}

/// Complete game state. Deliberately not serializable: save-state of
/// in-flight physics is out of scope; external collaborators consume
/// `FrameSnapshot` instead.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Levels supplied by the external asset loader
    pub levels: Vec<Level>,
    /// Index into `levels`
    pub level_index: u32,
    pub lives: u8,
    pub phase: GamePhase,
    /// Frame-counted delay for LevelCleared/GetReady
    pub delay_ticks: u32,
    pub bricks: BrickGrid,
    pub balls: BallSet,
    pub paddle: Paddle,
    pub powerups: PowerupSet,
}

impl GameState {
    /// Create a new run. `levels` must be non-empty: missing level data
    /// is a programming error, not a recoverable condition.
    pub fn new(seed: u64, levels: Vec<Level>) -> Self {
        Self::with_tuning(seed, levels, Tuning::default())
    }

    pub fn with_tuning(seed: u64, levels: Vec<Level>, tuning: Tuning) -> Self {
        assert!(!levels.is_empty(), "GameState requires at least one level");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.start_lives,
            balls: BallSet::new(tuning.ramp_interval_ticks, tuning.ramp_factor),
            tuning,
            levels,
            level_index: 0,
            phase: GamePhase::Loading,
            delay_ticks: 0,
            bricks: BrickGrid::new(1, 1),
            paddle: Paddle::default(),
            powerups: PowerupSet::new(),
        }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level_index as usize]
    }

    /// Whether the advanced level index still points at a level
    pub fn has_more_levels(&self) -> bool {
        (self.level_index as usize) < self.levels.len()
    }

    /// Read-only per-frame snapshot for the external renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut bricks = Vec::with_capacity(self.bricks.rows() * self.bricks.cols());
        for brick in self.bricks.iter() {
            let sprite = if brick.solid {
                sprites::BRICK_SOLID
            } else {
                sprites::brick(brick.color)
            };
            let mut view = EntityView::of(&brick.body, sprite);
            view.visible = !brick.dead || brick.particle_ticks > 0;
            bricks.push(view);
        }

        FrameSnapshot {
            balls: self
                .balls
                .iter()
                .map(|b| {
                    let sprite = if b.on_fire() {
                        sprites::BALL_FIRE
                    } else {
                        sprites::BALL
                    };
                    EntityView::of(&b.body, sprite)
                })
                .collect(),
            bricks,
            paddle: EntityView::of(&self.paddle.body, sprites::PADDLE),
            lasers: self
                .paddle
                .lasers
                .iter()
                .map(|l| EntityView::of(&l.body, sprites::LASER))
                .collect(),
            powerups: self
                .powerups
                .iter()
                .map(|p| EntityView::of(&p.body, sprites::powerup(p.kind)))
                .collect(),
            lives: self.lives,
            level_index: self.level_index,
            phase: self.phase,
        }
    }
}

/// Sprite/texture selector table for `EntityView::sprite`. The external
/// renderer maps these to texture handles; game logic never does.
pub mod sprites {
    use super::super::bricks::BrickColor;
    use super::super::powerups::PowerupKind;

    pub const BALL: u32 = 0;
    pub const BALL_FIRE: u32 = 1;
    pub const PADDLE: u32 = 2;
    pub const LASER: u32 = 3;
    pub const BRICK_SOLID: u32 = 10;

    pub fn brick(color: BrickColor) -> u32 {
        11 + color as u32
    }

    pub fn powerup(kind: PowerupKind) -> u32 {
        30 + kind as u32
    }
}

/// One renderable entity: position, size, visibility, sprite selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub visible: bool,
    pub sprite: u32,
}

impl EntityView {
    fn of(body: &Body, sprite: u32) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            w: body.size.x,
            h: body.size.y,
            visible: !body.hidden,
            sprite,
        }
    }
}

/// Read-only render/display snapshot of one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub balls: Vec<EntityView>,
    pub bricks: Vec<EntityView>,
    pub paddle: EntityView,
    pub lasers: Vec<EntityView>,
    pub powerups: Vec<EntityView>,
    pub lives: u8,
    pub level_index: u32,
    pub phase: GamePhase,
}

/// Position a serve ball on the paddle's top center
pub(crate) fn serve_position(paddle: &Body, ball_size: Vec2) -> Vec2 {
    Vec2::new(
        paddle.center_x() - ball_size.x / 2.0,
        paddle.top() - ball_size.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::demo_levels;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(42, demo_levels());
        assert_eq!(state.phase, GamePhase::Loading);
        assert_eq!(state.lives(), crate::consts::START_LIVES);
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.balls.count(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one level")]
    fn test_empty_levels_rejected() {
        let _ = GameState::new(42, Vec::new());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(42, demo_levels());
        let snap = state.snapshot();
        let json = serde_json::to_string(&snap).expect("snapshot to json");
        assert!(json.contains("\"lives\":3"));
    }
}
