//! Paddle-fired laser projectiles
//!
//! Lasers reuse hidden slots (at most two per fire event), travel
//! straight up, and die on the first brick they touch or on leaving the
//! top of the playfield.

use glam::Vec2;

use crate::consts::{LASER_H, LASER_SPEED, LASER_W, WALL};

use super::bricks::BrickGrid;
use super::entity::Body;
use super::events::{FrameEvents, SoundCue};

/// A single laser bolt
#[derive(Debug, Clone)]
pub struct Laser {
    pub body: Body,
}

impl Laser {
    fn new(pos: Vec2) -> Self {
        let mut body = Body::new(pos, Vec2::new(LASER_W, LASER_H));
        body.vel = Vec2::new(0.0, -LASER_SPEED);
        Self { body }
    }
}

/// Reuse pool of laser bolts
#[derive(Debug, Clone, Default)]
pub struct LaserSet {
    lasers: Vec<Laser>,
}

impl LaserSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Laser> {
        self.lasers.iter()
    }

    pub fn count(&self) -> usize {
        self.lasers.iter().filter(|l| !l.body.hidden).count()
    }

    /// Fire one burst: two bolts at the paddle's left and right edges.
    /// Hidden slots are reused before new bolts are allocated; at most
    /// two spawn per fire event.
    pub fn fire(&mut self, paddle: &Body) {
        let y = paddle.top() - LASER_H;
        let positions = [
            Vec2::new(paddle.left(), y),
            Vec2::new(paddle.right() - LASER_W, y),
        ];
        for pos in positions {
            if let Some(slot) = self.lasers.iter_mut().find(|l| l.body.hidden) {
                slot.body.pos = pos;
                slot.body.vel = Vec2::new(0.0, -LASER_SPEED);
                slot.body.hidden = false;
            } else {
                self.lasers.push(Laser::new(pos));
            }
        }
    }

    /// Hide every bolt (level teardown)
    pub fn clear(&mut self) {
        for laser in &mut self.lasers {
            laser.body.hidden = true;
        }
    }

    /// Advance bolts one frame: integrate, cull at the top wall, and
    /// register the first brick hit per bolt.
    pub fn update(&mut self, grid: &mut BrickGrid, spawns: &mut Vec<Vec2>, events: &mut FrameEvents) {
        for laser in &mut self.lasers {
            if laser.body.hidden {
                continue;
            }
            laser.body.pos.y += laser.body.vel.y;

            if laser.body.bottom() < WALL {
                laser.body.hidden = true;
                continue;
            }

            if let Some((row, col)) = grid.hit_scan(&laser.body) {
                let (brick_body, has_powerup) = {
                    let brick = grid.cell(row, col);
                    (brick.body, brick.has_powerup)
                };
                let died = grid.mark_hit(row, col);
                if died && has_powerup {
                    spawns.push(brick_body.center());
                }
                events.push_sound(SoundCue::BrickHit);
                laser.body.hidden = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BRICK_HITS, SOLID_BRICK_HITS};

    fn paddle_body() -> Body {
        Body::new(Vec2::new(200.0, 740.0), Vec2::new(104.0, 18.0))
    }

    fn arm(grid: &mut BrickGrid, row: usize, col: usize, solid: bool) {
        let cell = grid.cell_mut(row, col);
        cell.dead = false;
        cell.solid = solid;
        cell.hits_left = if solid { SOLID_BRICK_HITS } else { BRICK_HITS };
    }

    #[test]
    fn test_fire_spawns_two_at_paddle_edges() {
        let mut set = LaserSet::new();
        let paddle = paddle_body();
        set.fire(&paddle);
        assert_eq!(set.count(), 2);
        let xs: Vec<f32> = set.iter().map(|l| l.body.pos.x).collect();
        assert_eq!(xs[0], paddle.left());
        assert_eq!(xs[1], paddle.right() - LASER_W);
    }

    #[test]
    fn test_fire_reuses_hidden_slots() {
        let mut set = LaserSet::new();
        set.fire(&paddle_body());
        set.clear();
        set.fire(&paddle_body());
        assert_eq!(set.lasers.len(), 2);
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn test_laser_culled_above_top_wall() {
        let mut set = LaserSet::new();
        let mut paddle = paddle_body();
        paddle.pos.y = WALL + 2.0;
        set.fire(&paddle);
        let mut grid = BrickGrid::new(1, 1);
        let mut spawns = Vec::new();
        let mut events = FrameEvents::new();
        set.update(&mut grid, &mut spawns, &mut events);
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_laser_kills_brick_and_dies() {
        let mut grid = BrickGrid::new(1, 2);
        arm(&mut grid, 0, 0, false);
        grid.cell_mut(0, 0).has_powerup = true;

        let brick = grid.cell(0, 0).body;
        let mut set = LaserSet::new();
        // One bolt just below the brick, about to cross into it
        let mut paddle = Body::new(
            Vec2::new(brick.left(), brick.bottom() + LASER_H + 4.0),
            Vec2::new(LASER_W, 18.0),
        );
        paddle.size.x = LASER_W;
        set.fire(&paddle);

        let mut spawns = Vec::new();
        let mut events = FrameEvents::new();
        set.update(&mut grid, &mut spawns, &mut events);

        assert!(grid.cell(0, 0).dead);
        assert_eq!(spawns.len(), 1);
        assert!(events.has_sound(SoundCue::BrickHit));
        // The first bolt kills the brick and hides; the second flies on
        // through the now-dead cell
        assert_eq!(set.count(), 1);
    }
}
