//! Level definitions and the text-grid loader
//!
//! A level is a list of row-strings of single-character cell codes:
//! `_` empty, `Z`/`A` solid, `X`/`B` breakable with no color assigned
//! yet, or a color code from the fixed key table. Unknown codes degrade
//! to dead cells (logged, never fatal). After assignment, boards that
//! used unassigned codes get one of three random colorization patterns,
//! then a board-size-dependent ratio of cells is flagged as power-up
//! carriers.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BRICK_HITS, SOLID_BRICK_HITS};

use super::bricks::{BrickColor, BrickGrid};

/// A parsed level definition as supplied by the external asset loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub rows: Vec<String>,
}

impl Level {
    pub fn from_rows(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Fixed brick-color-key table
const COLOR_KEYS: [(char, BrickColor); 6] = [
    ('R', BrickColor::Red),
    ('G', BrickColor::Green),
    ('Y', BrickColor::Yellow),
    ('P', BrickColor::Purple),
    ('O', BrickColor::Orange),
    ('C', BrickColor::Cyan),
];

/// Colorization palette for unassigned cells
const PALETTE: [BrickColor; 6] = [
    BrickColor::Red,
    BrickColor::Green,
    BrickColor::Yellow,
    BrickColor::Purple,
    BrickColor::Orange,
    BrickColor::Cyan,
];

fn color_for(code: char) -> Option<BrickColor> {
    COLOR_KEYS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, color)| *color)
}

/// Power-up carrier ratio by board size (row count)
fn powerup_ratio(rows: usize) -> f32 {
    if rows >= 15 {
        0.25
    } else if rows >= 8 {
        0.10
    } else {
        0.065
    }
}

/// Populate `grid` from a level definition. The grid is resized to the
/// level's dimensions (widest row wins), every cell assigned, colorized,
/// and power-up carriers placed. `begin_total` is locked in at the end.
pub fn load_level(grid: &mut BrickGrid, level: &Level, rng: &mut Pcg32) {
    let rows = level.rows.len();
    let cols = level.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    grid.reset(rows, cols);

    let mut unassigned: Vec<(usize, usize)> = Vec::new();

    for (row, line) in level.rows.iter().enumerate() {
        let mut chars = line.chars();
        for col in 0..cols {
            let code = chars.next().unwrap_or('_');
            let cell = grid.cell_mut(row, col);
            match code {
                '_' => {}
                'Z' | 'A' => {
                    cell.dead = false;
                    cell.solid = true;
                    cell.hits_left = SOLID_BRICK_HITS;
                    cell.color = BrickColor::Steel;
                }
                'X' | 'B' => {
                    cell.dead = false;
                    cell.hits_left = BRICK_HITS;
                    unassigned.push((row, col));
                }
                code => {
                    if let Some(color) = color_for(code) {
                        cell.dead = false;
                        cell.hits_left = BRICK_HITS;
                        cell.color = color;
                    } else {
                        log::warn!("unknown cell code {code:?} at ({row},{col}), treating as dead");
                    }
                }
            }
        }
    }

    if !unassigned.is_empty() {
        colorize(grid, rng);
    }
    place_powerups(grid, rng);

    grid.finalize_load();
    log::info!(
        "level loaded: {rows}x{cols}, {} breakable bricks",
        grid.begin_total()
    );
}

/// Apply one of three random colorization patterns to all live,
/// non-solid cells: per-row uniform, per-column uniform, or
/// board-uniform.
fn colorize(grid: &mut BrickGrid, rng: &mut Pcg32) {
    let rows = grid.rows();
    let cols = grid.cols();
    match rng.random_range(0..3u32) {
        0 => {
            for row in 0..rows {
                let color = PALETTE[rng.random_range(0..PALETTE.len())];
                for col in 0..cols {
                    paint(grid, row, col, color);
                }
            }
        }
        1 => {
            for col in 0..cols {
                let color = PALETTE[rng.random_range(0..PALETTE.len())];
                for row in 0..rows {
                    paint(grid, row, col, color);
                }
            }
        }
        _ => {
            let color = PALETTE[rng.random_range(0..PALETTE.len())];
            for row in 0..rows {
                for col in 0..cols {
                    paint(grid, row, col, color);
                }
            }
        }
    }
}

fn paint(grid: &mut BrickGrid, row: usize, col: usize, color: BrickColor) {
    let cell = grid.cell_mut(row, col);
    if !cell.dead && !cell.solid {
        cell.color = color;
    }
}

/// Flag a ratio of eligible cells as power-up carriers, drawing without
/// replacement until the count is reached or locations run out.
fn place_powerups(grid: &mut BrickGrid, rng: &mut Pcg32) {
    let mut eligible: Vec<(usize, usize)> = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = grid.cell(row, col);
            if !cell.dead && !cell.solid {
                eligible.push((row, col));
            }
        }
    }

    let want = (eligible.len() as f32 * powerup_ratio(grid.rows())).round() as usize;
    eligible.shuffle(rng);
    for &(row, col) in eligible.iter().take(want) {
        grid.cell_mut(row, col).has_powerup = true;
    }
}

/// Built-in levels for the demo binary and tests. Real deployments feed
/// level rows from the external asset loader instead.
pub fn demo_levels() -> Vec<Level> {
    vec![
        Level::from_rows(&[
            "XXXXXXXXXXX",
            "XXXXXXXXXXX",
            "XXXXXXXXXXX",
            "___________",
            "XX_XX_XX_XX",
        ]),
        Level::from_rows(&[
            "RRRRRRRRRRR",
            "GGGGGGGGGGG",
            "YYYYYYYYYYY",
            "Z_________Z",
            "PPPPPPPPPPP",
            "OOOOOOOOOOO",
        ]),
        Level::from_rows(&[
            "Z_XXXXXXX_Z",
            "_XXXXXXXXX_",
            "XX_XXXXX_XX",
            "XXXX___XXXX",
            "XX_XXXXX_XX",
            "_XXXXXXXXX_",
            "Z_XXXXXXX_Z",
        ]),
    ]
}
