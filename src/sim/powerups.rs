//! Falling power-up pickups
//!
//! Spawned when a powerup-carrier brick dies, with a kind rolled at spawn
//! time. Pickups fall at a fixed speed, hide below the bottom bound, and
//! on paddle contact report their kind back to the tick loop, which
//! dispatches exactly one effect.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_H, POWERUP_FALL_SPEED, POWERUP_SIZE};

use super::collision::overlaps;
use super::entity::Body;
use super::events::{FrameEvents, SoundCue};

/// Power-up effect kinds, fixed at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Magnet,
    ExpandPaddle,
    ShrinkPaddle,
    Laser,
    ExtraLife,
    ExtraBalls,
    SpeedUp,
    SpeedDown,
    Fireball,
}

const ALL_KINDS: [PowerupKind; 9] = [
    PowerupKind::Magnet,
    PowerupKind::ExpandPaddle,
    PowerupKind::ShrinkPaddle,
    PowerupKind::Laser,
    PowerupKind::ExtraLife,
    PowerupKind::ExtraBalls,
    PowerupKind::SpeedUp,
    PowerupKind::SpeedDown,
    PowerupKind::Fireball,
];

/// A falling pickup
#[derive(Debug, Clone)]
pub struct Powerup {
    pub body: Body,
    pub kind: PowerupKind,
}

impl Powerup {
    fn new(pos: Vec2, kind: PowerupKind) -> Self {
        let mut body = Body::new(pos, Vec2::splat(POWERUP_SIZE));
        body.vel = Vec2::new(0.0, POWERUP_FALL_SPEED);
        Self { body, kind }
    }
}

/// Reuse pool of pickups
#[derive(Debug, Clone, Default)]
pub struct PowerupSet {
    powerups: Vec<Powerup>,
}

impl PowerupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Powerup> {
        self.powerups.iter()
    }

    pub fn count(&self) -> usize {
        self.powerups.iter().filter(|p| !p.body.hidden).count()
    }

    /// Spawn a pickup centered at `center` with an RNG-rolled kind,
    /// reusing a hidden slot when one exists.
    pub fn spawn(&mut self, center: Vec2, rng: &mut Pcg32) {
        let kind = ALL_KINDS[rng.random_range(0..ALL_KINDS.len())];
        let pos = center - Vec2::splat(POWERUP_SIZE / 2.0);
        if let Some(slot) = self.powerups.iter_mut().find(|p| p.body.hidden) {
            slot.body.pos = pos;
            slot.body.vel = Vec2::new(0.0, POWERUP_FALL_SPEED);
            slot.body.hidden = false;
            slot.kind = kind;
        } else {
            self.powerups.push(Powerup::new(pos, kind));
        }
    }

    /// Hide every pickup (level teardown)
    pub fn clear(&mut self) {
        for p in &mut self.powerups {
            p.body.hidden = true;
        }
    }

    /// Advance pickups one frame. Returns the kinds collected by the
    /// paddle this frame; the caller applies the effects.
    pub fn update(&mut self, paddle: &Body, events: &mut FrameEvents) -> Vec<PowerupKind> {
        let mut collected = Vec::new();
        for p in &mut self.powerups {
            if p.body.hidden {
                continue;
            }
            if overlaps(&p.body, paddle) {
                p.body.hidden = true;
                events.push_sound(SoundCue::PowerupCollected);
                collected.push(p.kind);
                continue;
            }
            p.body.pos.y += p.body.vel.y;
            if p.body.top() > FIELD_H {
                p.body.hidden = true;
            }
        }
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(11)
    }

    fn paddle() -> Body {
        Body::new(Vec2::new(200.0, 740.0), Vec2::new(104.0, 18.0))
    }

    #[test]
    fn test_spawn_positions_at_center() {
        let mut set = PowerupSet::new();
        set.spawn(Vec2::new(100.0, 100.0), &mut rng());
        assert_eq!(set.count(), 1);
        let p = set.iter().next().expect("powerup");
        assert_eq!(p.body.center(), Vec2::new(100.0, 100.0));
        assert_eq!(p.body.vel.y, POWERUP_FALL_SPEED);
    }

    #[test]
    fn test_spawn_reuses_hidden_slot() {
        let mut set = PowerupSet::new();
        let mut rng = rng();
        set.spawn(Vec2::new(100.0, 100.0), &mut rng);
        set.clear();
        set.spawn(Vec2::new(140.0, 100.0), &mut rng);
        assert_eq!(set.powerups.len(), 1);
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_pickup_collected_by_paddle() {
        let mut set = PowerupSet::new();
        let paddle = paddle();
        set.spawn(paddle.center(), &mut rng());

        let mut events = FrameEvents::new();
        let collected = set.update(&paddle, &mut events);
        assert_eq!(collected.len(), 1);
        assert_eq!(set.count(), 0);
        assert!(events.has_sound(SoundCue::PowerupCollected));
    }

    #[test]
    fn test_pickup_falls_and_expires_below_bottom() {
        let mut set = PowerupSet::new();
        set.spawn(Vec2::new(100.0, FIELD_H - 2.0), &mut rng());

        let paddle = paddle();
        let mut events = FrameEvents::new();
        for _ in 0..10 {
            set.update(&paddle, &mut events);
        }
        assert_eq!(set.count(), 0);
        assert!(!events.has_sound(SoundCue::PowerupCollected));
    }

    #[test]
    fn test_kind_fixed_at_spawn() {
        let mut set = PowerupSet::new();
        let mut rng = rng();
        set.spawn(Vec2::new(100.0, 100.0), &mut rng);
        let kind = set.iter().next().expect("powerup").kind;
        let paddle = paddle();
        let mut events = FrameEvents::new();
        set.update(&paddle, &mut events);
        assert_eq!(set.iter().next().expect("powerup").kind, kind);
    }
}
