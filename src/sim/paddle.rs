//! Player paddle: touch-target motion, english bounce, power-up state
//!
//! The paddle consumes the last-known touch sample per tick, steps toward
//! the target at a power-scaled speed, and resolves downward-moving ball
//! collisions through the five-band english table. It owns the laser set
//! and the magnet/laser capability timers.

use glam::Vec2;

use crate::consts::{
    FIELD_W, PADDLE_BASE_SPEED, PADDLE_DEFAULT_W, PADDLE_H, PADDLE_MAX_W, PADDLE_MIN_W,
    PADDLE_STEP, PADDLE_Y, WALL,
};

use super::balls::BallSet;
use super::bricks::BrickGrid;
use super::collision::{clamp_axis_speed, edge_band, overlaps};
use super::entity::Body;
use super::events::{FrameEvents, SoundCue};
use super::lasers::LaserSet;

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: Body,
    /// Last touch target x (playfield coordinates, pre-scaled by the
    /// external input layer)
    target_x: f32,
    pressed: bool,
    /// Movement-power ratio from press intensity, 0.0..=1.0
    power: f32,
    /// Magnet capability: caught balls freeze and ride the paddle
    magnet: bool,
    magnet_ticks: u32,
    /// Laser capability window and burst cooldown
    laser: bool,
    laser_ticks: u32,
    laser_cooldown: u32,
    laser_burst: u32,
    pub lasers: LaserSet,
}

impl Default for Paddle {
    fn default() -> Self {
        let x = (FIELD_W - PADDLE_DEFAULT_W) / 2.0;
        Self {
            body: Body::new(Vec2::new(x, PADDLE_Y), Vec2::new(PADDLE_DEFAULT_W, PADDLE_H)),
            target_x: FIELD_W / 2.0,
            pressed: false,
            power: 0.0,
            magnet: false,
            magnet_ticks: 0,
            laser: false,
            laser_ticks: 0,
            laser_cooldown: 0,
            laser_burst: 0,
            lasers: LaserSet::new(),
        }
    }
}

impl Paddle {
    /// Record the latest input sample (last-write-wins per frame)
    pub fn touch(&mut self, target_x: f32, pressed: bool, power: f32) {
        self.target_x = target_x;
        self.pressed = pressed;
        self.power = power.clamp(0.0, 1.0);
    }

    pub fn magnet_active(&self) -> bool {
        self.magnet
    }

    pub fn laser_active(&self) -> bool {
        self.laser
    }

    /// Grant the magnet capability for `ticks` frames
    pub fn grant_magnet(&mut self, ticks: u32) {
        self.magnet = true;
        self.magnet_ticks = ticks;
    }

    /// Grant the laser capability: bursts every `burst` ticks until the
    /// `window` elapses. The first burst fires immediately.
    pub fn grant_laser(&mut self, window: u32, burst: u32) {
        self.laser = true;
        self.laser_ticks = window;
        self.laser_burst = burst;
        self.laser_cooldown = 0;
    }

    /// Drop all capabilities and recenter (level load)
    pub fn reset(&mut self) {
        let width = self.body.size.x;
        self.body.pos.x = (FIELD_W - width) / 2.0;
        self.magnet = false;
        self.magnet_ticks = 0;
        self.laser = false;
        self.laser_ticks = 0;
        self.laser_cooldown = 0;
        self.pressed = false;
        self.lasers.clear();
    }

    /// Widen by one step, clamped; the paddle grows around its center
    pub fn expand(&mut self) {
        self.resize(self.body.size.x + PADDLE_STEP);
    }

    /// Narrow by one step, clamped
    pub fn shrink(&mut self) {
        self.resize(self.body.size.x - PADDLE_STEP);
    }

    fn resize(&mut self, width: f32) {
        let width = width.clamp(PADDLE_MIN_W, PADDLE_MAX_W);
        let delta = width - self.body.size.x;
        self.body.size.x = width;
        self.body.pos.x -= delta / 2.0;
        self.clamp_x();
    }

    fn clamp_x(&mut self) {
        let max_x = FIELD_W - WALL - self.body.size.x;
        self.body.pos.x = self.body.pos.x.clamp(WALL, max_x);
    }

    /// Advance one frame: motion, ball bounce/catch, lasers, timers.
    pub fn update(
        &mut self,
        balls: &mut BallSet,
        grid: &mut BrickGrid,
        spawns: &mut Vec<Vec2>,
        events: &mut FrameEvents,
    ) {
        // Step toward the touch target; snap when within one step
        if self.pressed {
            let step = PADDLE_BASE_SPEED * self.power;
            let center = self.body.center_x();
            let delta = self.target_x - center;
            if delta.abs() <= step {
                self.body.pos.x += delta;
            } else {
                self.body.pos.x += step * delta.signum();
            }
        }
        self.clamp_x();

        // Caught balls ride along via their stored offset
        let left = self.body.left();
        let top = self.body.top();
        for ball in balls.iter_mut().filter(|b| !b.body.hidden && b.frozen) {
            ball.body.pos.x = left + ball.carry_offset;
            ball.body.pos.y = top - ball.body.size.y;
        }

        self.collide_balls(balls, events);

        self.lasers.update(grid, spawns, events);

        // Capability timers
        if self.magnet {
            self.magnet_ticks = self.magnet_ticks.saturating_sub(1);
            if self.magnet_ticks == 0 {
                self.magnet = false;
            }
        }
        if self.laser {
            if self.laser_cooldown == 0 {
                self.lasers.fire(&self.body);
                events.push_sound(SoundCue::LaserFire);
                self.laser_cooldown = self.laser_burst;
            }
            self.laser_cooldown = self.laser_cooldown.saturating_sub(1);
            self.laser_ticks = self.laser_ticks.saturating_sub(1);
            if self.laser_ticks == 0 {
                self.laser = false;
            }
        }
    }

    /// Bounce or catch every downward-moving ball that overlaps the
    /// paddle. The vertical-midpoint guard prevents re-triggering on a
    /// ball that has already tunneled past the paddle face.
    fn collide_balls(&mut self, balls: &mut BallSet, events: &mut FrameEvents) {
        let paddle_body = self.body;
        for ball in balls.iter_mut().filter(|b| !b.body.hidden && !b.frozen) {
            if ball.body.vel.y <= 0.0 {
                continue;
            }
            if !overlaps(&ball.body, &paddle_body) {
                continue;
            }
            if ball.body.center_y() > paddle_body.center_y() {
                continue;
            }

            ball.body.vel.y = -clamp_axis_speed(ball.body.vel.y).abs();
            let hit = edge_band(ball.body.center_x(), paddle_body.left(), paddle_body.size.x);
            ball.x_ratio = hit.ratio;
            // Force dx away from the struck edge
            ball.body.vel.x = clamp_axis_speed(hit.dir * ball.body.vel.x.abs());

            if self.magnet {
                ball.frozen = true;
                ball.carry_offset = ball.body.pos.x - paddle_body.left();
                events.push_sound(SoundCue::PaddleCatch);
            } else {
                events.push_sound(SoundCue::PaddleHit);
                events.haptic_pulse = true;
            }
        }
    }
}
