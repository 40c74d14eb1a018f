//! Collision primitives shared by every entity pair
//!
//! Everything here is pure and stateless: the AABB overlap test, the
//! per-axis speed clamp that enforces the ball speed invariant, and the
//! five-band edge-margin table that drives both the paddle's english
//! bounce and solid-brick corner deflection.

use crate::consts::{BALL_SPEED_MAX, BALL_SPEED_MIN};

use super::entity::Body;

/// Axis-aligned overlap test: true unless `a` is entirely to the left,
/// right, above, or below `b`.
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Clamp one velocity axis into `[BALL_SPEED_MIN, BALL_SPEED_MAX]`,
/// preserving sign. Applied on every ball velocity write.
#[inline]
pub fn clamp_axis_speed(v: f32) -> f32 {
    let sign = if v < 0.0 { -1.0 } else { 1.0 };
    sign * v.abs().clamp(BALL_SPEED_MIN, BALL_SPEED_MAX)
}

/// Symmetric band thresholds, as a fraction of width from either edge
const BAND_THRESHOLDS: [f32; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
/// Horizontal-english velocity scale per band, outermost first
const BAND_RATIOS: [f32; 5] = [1.35, 1.15, 0.75, 0.5, 0.0];

/// Result of an edge-band lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// x-velocity scale (the ball's persistent "english")
    pub ratio: f32,
    /// Forced dx sign: -1.0 near the left edge, +1.0 near the right
    pub dir: f32,
    /// Band index, 0 = outermost
    pub band: usize,
}

impl EdgeHit {
    /// Whether the strike landed close enough to an edge to count as a
    /// corner hit (the two outermost bands)
    pub fn is_corner(&self) -> bool {
        self.band < 2
    }
}

/// Map a strike x-coordinate against a surface (`left`, `width`) to its
/// english band. Thresholds are measured from the nearer edge; ties at
/// the exact center resolve to the innermost band on the left side.
pub fn edge_band(hit_x: f32, left: f32, width: f32) -> EdgeHit {
    let from_left = ((hit_x - left) / width).clamp(0.0, 1.0);
    let from_right = 1.0 - from_left;

    for (band, &threshold) in BAND_THRESHOLDS.iter().enumerate() {
        if from_left <= threshold {
            return EdgeHit {
                ratio: BAND_RATIOS[band],
                dir: -1.0,
                band,
            };
        }
        if from_right <= threshold {
            return EdgeHit {
                ratio: BAND_RATIOS[band],
                dir: 1.0,
                band,
            };
        }
    }

    // Unreachable: the 50% bands cover the whole width
    EdgeHit {
        ratio: 0.0,
        dir: 1.0,
        band: 4,
    }
}
