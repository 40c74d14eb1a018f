//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (row-major bricks, slot order everywhere else)
//! - No rendering or platform dependencies

pub mod balls;
pub mod bricks;
pub mod collision;
pub mod entity;
pub mod events;
pub mod lasers;
pub mod level;
pub mod paddle;
pub mod powerups;
pub mod state;
pub mod tick;

pub use balls::{Ball, BallSet};
pub use bricks::{Brick, BrickColor, BrickGrid};
pub use collision::{EdgeHit, clamp_axis_speed, edge_band, overlaps};
pub use entity::Body;
pub use events::{FrameEvents, SoundCue};
pub use lasers::{Laser, LaserSet};
pub use level::{Level, demo_levels, load_level};
pub use paddle::Paddle;
pub use powerups::{Powerup, PowerupKind, PowerupSet};
pub use state::{
    EntityView, FrameSnapshot, GamePhase, GameState, PaddleTouch, TickInput,
};
pub use tick::tick;
