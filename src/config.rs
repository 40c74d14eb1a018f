//! Data-driven game balance
//!
//! Scalars the embedding layer may want to tune without recompiling.
//! Defaults mirror the `consts` table; a `Tuning` is fixed for the
//! lifetime of a `GameState`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game-balance knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at run start
    pub start_lives: u8,
    /// Ticks between global speed ramps
    pub ramp_interval_ticks: u32,
    /// Per-axis velocity multiplier applied on each ramp
    pub ramp_factor: f32,
    /// Fire-mode duration in ticks
    pub fire_ticks: u32,
    /// Magnet capability duration in ticks
    pub magnet_ticks: u32,
    /// Laser capability window in ticks
    pub laser_window_ticks: u32,
    /// Ticks between laser bursts
    pub laser_burst_ticks: u32,
    /// Celebration delay after clearing a level
    pub level_clear_ticks: u32,
    /// "Get ready" delay after losing a life
    pub get_ready_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            ramp_interval_ticks: SPEED_RAMP_TICKS,
            ramp_factor: SPEED_RAMP_FACTOR,
            fire_ticks: FIRE_TICKS,
            magnet_ticks: MAGNET_TICKS,
            laser_window_ticks: LASER_WINDOW_TICKS,
            laser_burst_ticks: LASER_BURST_TICKS,
            level_clear_ticks: LEVEL_CLEAR_TICKS,
            get_ready_ticks: GET_READY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
