//! Ball pool and the central per-frame physics loop
//!
//! Balls integrate position, scan the brick grid row-major (first hit
//! wins, one brick per ball per frame), bounce off walls, and fall out
//! the bottom. Slots are pooled: a hidden ball is reused before a new
//! one is allocated, up to `MAX_BALL_LIMIT`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{
    BALL_SIZE, BALL_SPEED_MIN, FIELD_H, FIELD_W, FIRE_TICKS, MAX_BALL_LIMIT, WALL,
};

use super::bricks::BrickGrid;
use super::collision::{clamp_axis_speed, edge_band};
use super::entity::Body;
use super::events::{FrameEvents, SoundCue};

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    /// Persistent horizontal-velocity scale from the last paddle bounce
    /// ("english"); multiplies dx during integration, never touches dy
    pub x_ratio: f32,
    /// Frozen balls skip integration and collisions (magnet carry,
    /// pre-launch serve)
    pub frozen: bool,
    /// Fire mode countdown; while nonzero every touched brick dies in one
    /// hit and solid bounces are bypassed
    pub fire_ticks: u32,
    /// x distance from the paddle's left edge while caught by the magnet
    pub carry_offset: f32,
    /// Render animation counter
    pub anim: u8,
}

impl Ball {
    fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(BALL_SIZE)),
            x_ratio: 1.0,
            frozen: false,
            fire_ticks: 0,
            carry_offset: 0.0,
            anim: 0,
        }
    }

    pub fn on_fire(&self) -> bool {
        self.fire_ticks > 0
    }

    /// Reset a pooled slot for relaunch
    fn respawn(&mut self, pos: Vec2, rng: &mut Pcg32) {
        self.body.pos = pos;
        self.body.hidden = false;
        self.x_ratio = 1.0;
        self.frozen = false;
        self.fire_ticks = 0;
        self.carry_offset = 0.0;
        self.launch(rng);
    }

    /// Launch upward at minimum speed with a randomized horizontal side
    pub fn launch(&mut self, rng: &mut Pcg32) {
        let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.body.vel = Vec2::new(side * BALL_SPEED_MIN, -BALL_SPEED_MIN);
    }
}

/// Pool of active balls plus the global speed-ramp timer
#[derive(Debug, Clone)]
pub struct BallSet {
    balls: Vec<Ball>,
    ramp_ticks: u32,
    ramp_interval: u32,
    ramp_factor: f32,
}

impl BallSet {
    pub fn new(ramp_interval: u32, ramp_factor: f32) -> Self {
        Self {
            balls: Vec::with_capacity(MAX_BALL_LIMIT),
            ramp_ticks: 0,
            ramp_interval,
            ramp_factor,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    /// Balls currently in play
    pub fn count(&self) -> usize {
        self.balls.iter().filter(|b| !b.body.hidden).count()
    }

    /// Spawn a ball at `(x, y)`: reuse the first hidden slot, else
    /// allocate below the cap. Beyond the cap this is a silent no-op.
    pub fn add(&mut self, x: f32, y: f32, rng: &mut Pcg32) {
        let pos = Vec2::new(x, y);
        if let Some(slot) = self.balls.iter_mut().find(|b| b.body.hidden) {
            slot.respawn(pos, rng);
            return;
        }
        if self.balls.len() < MAX_BALL_LIMIT {
            let mut ball = Ball::new(pos);
            ball.launch(rng);
            self.balls.push(ball);
        }
    }

    /// Hide every ball (level teardown)
    pub fn clear(&mut self) {
        for ball in &mut self.balls {
            ball.body.hidden = true;
        }
    }

    /// Suspend or resume integration for all balls; velocities untouched
    pub fn set_frozen(&mut self, frozen: bool) {
        for ball in self.balls.iter_mut().filter(|b| !b.body.hidden) {
            ball.frozen = frozen;
        }
    }

    /// Enable fire mode on every active ball
    pub fn set_fire_all(&mut self, ticks: u32) {
        for ball in self.balls.iter_mut().filter(|b| !b.body.hidden) {
            ball.fire_ticks = ticks.max(1).min(FIRE_TICKS);
        }
    }

    pub fn clear_fire(&mut self) {
        for ball in &mut self.balls {
            ball.fire_ticks = 0;
        }
    }

    /// Scale both velocity axes of every active ball, re-clamped
    pub fn scale_speeds(&mut self, factor: f32) {
        for ball in self.balls.iter_mut().filter(|b| !b.body.hidden) {
            ball.body.vel.x = clamp_axis_speed(ball.body.vel.x * factor);
            ball.body.vel.y = clamp_axis_speed(ball.body.vel.y * factor);
        }
    }

    /// Advance every ball one frame: integration, brick collisions,
    /// wall bounds, loss detection, and the global speed ramp.
    ///
    /// Destroyed powerup-carrier bricks push a spawn position onto
    /// `spawns`; the tick loop turns those into pickups.
    pub fn update(&mut self, grid: &mut BrickGrid, spawns: &mut Vec<Vec2>, events: &mut FrameEvents) {
        for ball in &mut self.balls {
            if ball.body.hidden {
                continue;
            }
            ball.anim = ball.anim.wrapping_add(1);
            if ball.fire_ticks > 0 {
                ball.fire_ticks -= 1;
            }
            if ball.frozen {
                continue;
            }

            // Integrate: english scales dx only
            ball.body.pos.x += ball.x_ratio * ball.body.vel.x;
            ball.body.pos.y += ball.body.vel.y;

            // Row-major scan, first hit wins, one brick per ball per frame
            if let Some((row, col)) = grid.hit_scan(&ball.body) {
                resolve_brick_hit(ball, grid, row, col, spawns, events);
            }

            // Playfield bounds
            let mut wall_bounce = false;
            if ball.body.left() < WALL {
                ball.body.pos.x = WALL;
                ball.body.vel.x = ball.body.vel.x.abs();
                wall_bounce = true;
            } else if ball.body.right() > FIELD_W - WALL {
                ball.body.pos.x = FIELD_W - WALL - ball.body.size.x;
                ball.body.vel.x = -ball.body.vel.x.abs();
                wall_bounce = true;
            }
            if ball.body.top() < WALL {
                ball.body.pos.y = WALL;
                ball.body.vel.y = ball.body.vel.y.abs();
                wall_bounce = true;
            }
            if wall_bounce {
                events.push_sound(SoundCue::WallBounce);
            }

            // Bottom edge: the ball is lost, not destroyed
            if ball.body.top() > FIELD_H {
                ball.body.hidden = true;
                events.push_sound(SoundCue::BallLost);
            }
        }

        // Global speed ramp
        self.ramp_ticks += 1;
        if self.ramp_ticks >= self.ramp_interval {
            self.ramp_ticks = 0;
            let factor = self.ramp_factor;
            self.scale_speeds(factor);
            log::debug!("speed ramp applied (x{factor})");
        }
    }

    /// Reset the ramp timer (level load)
    pub fn reset_ramp(&mut self) {
        self.ramp_ticks = 0;
    }
}

/// Resolve one ball-brick collision according to brick type and fire mode
fn resolve_brick_hit(
    ball: &mut Ball,
    grid: &mut BrickGrid,
    row: usize,
    col: usize,
    spawns: &mut Vec<Vec2>,
    events: &mut FrameEvents,
) {
    let (solid, brick_body, has_powerup) = {
        let brick = grid.cell(row, col);
        (brick.solid, brick.body, brick.has_powerup)
    };

    let died = if ball.on_fire() {
        // Fire balls one-shot anything and never bounce off bricks
        events.push_sound(SoundCue::BrickHit);
        grid.smash(row, col)
    } else if solid {
        events.push_sound(SoundCue::SolidBrickHit);
        let died = grid.mark_hit(row, col);

        ball.body.vel.y = clamp_axis_speed(-ball.body.vel.y);
        // Corner deflection: only when the ball's vertical midpoint is
        // inside the brick's vertical span. Outside the span a solid hit
        // reflects dy only.
        let mid_y = ball.body.center_y();
        if mid_y >= brick_body.top() && mid_y <= brick_body.bottom() {
            let hit = edge_band(ball.body.center_x(), brick_body.left(), brick_body.size.x);
            if hit.is_corner() {
                ball.body.vel.x = clamp_axis_speed(-ball.body.vel.x);
            }
        }
        died
    } else {
        // Normal destructive hit: dy reflection only
        events.push_sound(SoundCue::BrickHit);
        ball.body.vel.y = clamp_axis_speed(-ball.body.vel.y);
        grid.mark_hit(row, col)
    };

    if died && has_powerup {
        spawns.push(brick_body.center());
    }
}
