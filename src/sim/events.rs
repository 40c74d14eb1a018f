//! Per-frame event sink for external collaborators
//!
//! The core performs no audio, haptics, or persistence itself. Each tick
//! fills a `FrameEvents` that the embedding layer drains: one-shot sound
//! cues (deduped per category per frame), a haptic pulse flag, and the
//! level-completion signal for the statistics store.

use serde::{Deserialize, Serialize};

/// One-shot sound cue categories. At most one of each per frame:
/// simultaneous collisions in the same category collapse to one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    WallBounce,
    BrickHit,
    SolidBrickHit,
    BallLost,
    PaddleHit,
    PaddleCatch,
    LaserFire,
    PowerupCollected,
    FireballCollected,
    ExtraLife,
    LevelComplete,
    GameOver,
}

/// Everything the outside world needs to react to one simulation tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameEvents {
    sounds: Vec<SoundCue>,
    /// Single vibration pulse (paddle hit without magnet, or life loss)
    pub haptic_pulse: bool,
    /// Set once when a level is cleared; the external store persists it
    pub level_completed: Option<u32>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a cue, collapsing duplicates within the frame
    pub fn push_sound(&mut self, cue: SoundCue) {
        if !self.sounds.contains(&cue) {
            self.sounds.push(cue);
        }
    }

    pub fn sounds(&self) -> &[SoundCue] {
        &self.sounds
    }

    pub fn has_sound(&self, cue: SoundCue) -> bool {
        self.sounds.contains(&cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_dedup_per_frame() {
        let mut events = FrameEvents::new();
        events.push_sound(SoundCue::WallBounce);
        events.push_sound(SoundCue::WallBounce);
        events.push_sound(SoundCue::BrickHit);
        assert_eq!(events.sounds().len(), 2);
        assert!(events.has_sound(SoundCue::WallBounce));
        assert!(events.has_sound(SoundCue::BrickHit));
    }
}
