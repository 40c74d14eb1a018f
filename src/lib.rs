//! Brickline - a Breakout/Arkanoid simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Data-driven game balance
//! - `progress`: Level-completion statistics snapshot
//!
//! The crate is headless: rendering, audio playback, haptics, and input
//! capture live in external collaborators. The simulation consumes a
//! last-known paddle touch per tick and emits discrete sound/haptic cues
//! plus read-only entity snapshots.

pub mod config;
pub mod progress;
pub mod sim;

pub use config::Tuning;
pub use progress::Progress;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (90 Hz, the native update rate)
    pub const SIM_DT: f32 = 1.0 / 90.0;
    /// Ticks per second
    pub const TICK_RATE: u32 = 90;

    /// Playfield dimensions (portrait)
    pub const FIELD_W: f32 = 480.0;
    pub const FIELD_H: f32 = 800.0;
    /// Wall thickness on the left, right, and top edges
    pub const WALL: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 12.0;
    /// Minimum per-axis ball speed (|dx| and |dy| never drop below this)
    pub const BALL_SPEED_MIN: f32 = 6.15;
    /// Maximum per-axis ball speed
    pub const BALL_SPEED_MAX: f32 = 24.6;
    /// Hard cap on pooled balls
    pub const MAX_BALL_LIMIT: usize = 5;

    /// Speed ramp: every 45 seconds, scale every active ball
    pub const SPEED_RAMP_TICKS: u32 = 45 * TICK_RATE;
    pub const SPEED_RAMP_FACTOR: f32 = 1.08;

    /// Fire mode duration (20 seconds)
    pub const FIRE_TICKS: u32 = 20 * TICK_RATE;

    /// Paddle defaults
    pub const PADDLE_MIN_W: f32 = 56.0;
    pub const PADDLE_MAX_W: f32 = 152.0;
    pub const PADDLE_DEFAULT_W: f32 = 104.0;
    pub const PADDLE_H: f32 = 18.0;
    /// Width change per expand/shrink pickup
    pub const PADDLE_STEP: f32 = 16.0;
    /// Horizontal step per tick at full touch power
    pub const PADDLE_BASE_SPEED: f32 = 14.0;
    /// Paddle top edge y
    pub const PADDLE_Y: f32 = 740.0;

    /// Magnet capability duration (10 seconds)
    pub const MAGNET_TICKS: u32 = 10 * TICK_RATE;

    /// Laser capability window (4 seconds) and burst period (0.5 seconds)
    pub const LASER_WINDOW_TICKS: u32 = 4 * TICK_RATE;
    pub const LASER_BURST_TICKS: u32 = TICK_RATE / 2;
    pub const LASER_SPEED: f32 = 16.0;
    pub const LASER_W: f32 = 4.0;
    pub const LASER_H: f32 = 14.0;

    /// Powerup defaults
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 4.0;

    /// Brick grid geometry
    pub const BRICK_W: f32 = 40.0;
    pub const BRICK_H: f32 = 20.0;
    pub const GRID_START_X: f32 = 20.0;
    pub const GRID_START_Y: f32 = 60.0;
    /// Hits to destroy a solid brick (fire balls bypass this)
    pub const SOLID_BRICK_HITS: u8 = 3;
    pub const BRICK_HITS: u8 = 1;
    /// Visual debris timer armed when a brick dies
    pub const BRICK_PARTICLE_TICKS: u32 = 30;

    /// Frame-counted phase delays
    pub const LEVEL_CLEAR_TICKS: u32 = 2 * TICK_RATE;
    pub const GET_READY_TICKS: u32 = TICK_RATE + TICK_RATE / 2;

    /// Starting lives
    pub const START_LIVES: u8 = 3;
}
