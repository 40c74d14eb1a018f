//! Brick cells and the level grid
//!
//! Bricks are grid-allocated once per level-size change and reused across
//! levels: fields are reset on load, cells are never individually freed.
//! Solid bricks take more hits, never count toward level completion, and
//! only fire balls can one-shot them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BRICK_H, BRICK_PARTICLE_TICKS, BRICK_W, GRID_START_X, GRID_START_Y, SOLID_BRICK_HITS,
};

use super::entity::Body;

/// Brick color palette; a pure render selector, no gameplay meaning
/// except that `Steel` marks the solid texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Green,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Steel,
}

/// One grid cell
#[derive(Debug, Clone)]
pub struct Brick {
    pub body: Body,
    pub dead: bool,
    pub solid: bool,
    pub has_powerup: bool,
    /// Collisions remaining until destruction; 0 exactly when dead
    pub hits_left: u8,
    /// Visual debris countdown, armed on destruction
    pub particle_ticks: u32,
    pub color: BrickColor,
}

impl Brick {
    fn at(row: usize, col: usize) -> Self {
        let pos = Vec2::new(
            GRID_START_X + col as f32 * BRICK_W,
            GRID_START_Y + row as f32 * BRICK_H,
        );
        Self {
            body: Body::new(pos, Vec2::new(BRICK_W, BRICK_H)),
            dead: true,
            solid: false,
            has_powerup: false,
            hits_left: 0,
            particle_ticks: 0,
            color: BrickColor::Red,
        }
    }

    /// Reset to a dead cell, keeping grid position
    fn clear(&mut self) {
        self.dead = true;
        self.solid = false;
        self.has_powerup = false;
        self.hits_left = 0;
        self.particle_ticks = 0;
        self.color = BrickColor::Red;
    }

    /// Live bricks block balls and lasers
    pub fn alive(&self) -> bool {
        !self.dead
    }
}

/// 2D brick grid, row-major. `begin_total` counts the non-solid bricks at
/// level start; `destroyed` accumulates until the two meet.
#[derive(Debug, Clone)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Brick>,
    begin_total: u32,
    destroyed: u32,
}

impl BrickGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            begin_total: 0,
            destroyed: 0,
        };
        grid.reset(rows, cols);
        grid
    }

    /// (Re)initialize for a level. Reallocates only when the dimensions
    /// change; otherwise every cell is repositioned and cleared in place.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        if rows != self.rows || cols != self.cols {
            self.rows = rows;
            self.cols = cols;
            self.cells = (0..rows * cols)
                .map(|i| Brick::at(i / cols, i % cols))
                .collect();
        } else {
            for cell in &mut self.cells {
                cell.clear();
            }
        }
        self.begin_total = 0;
        self.destroyed = 0;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &Brick {
        &self.cells[row * self.cols + col]
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Brick {
        &mut self.cells[row * self.cols + col]
    }

    /// Row-major iteration over all cells
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut()
    }

    /// Lock in `begin_total` after the level loader has populated cells
    pub fn finalize_load(&mut self) {
        self.begin_total = self.live_count();
        self.destroyed = 0;
    }

    /// First live brick overlapping `body`, row-major, first match wins.
    /// The scan order is observable gameplay (tie-break when a ball
    /// overlaps two adjacent bricks) and must stay row-major.
    pub fn hit_scan(&self, body: &Body) -> Option<(usize, usize)> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let brick = self.cell(row, col);
                if brick.alive() && super::collision::overlaps(body, &brick.body) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Register one collision on a cell. Returns true if the brick died
    /// on this hit.
    pub fn mark_hit(&mut self, row: usize, col: usize) -> bool {
        let solid = self.cell(row, col).solid;
        let brick = self.cell_mut(row, col);
        if brick.dead {
            return false;
        }
        brick.hits_left = brick.hits_left.saturating_sub(1);
        if brick.hits_left == 0 {
            brick.dead = true;
            brick.particle_ticks = BRICK_PARTICLE_TICKS;
            if !solid {
                self.destroyed += 1;
            }
            return true;
        }
        false
    }

    /// Fire-ball destruction: force the remaining collision count to zero
    /// in a single hit, solid or not.
    pub fn smash(&mut self, row: usize, col: usize) -> bool {
        let brick = self.cell_mut(row, col);
        if brick.dead {
            return false;
        }
        brick.hits_left = 1;
        self.mark_hit(row, col)
    }

    /// Cells still standing that count toward completion
    pub fn live_count(&self) -> u32 {
        self.cells.iter().filter(|b| !b.dead && !b.solid).count() as u32
    }

    pub fn begin_total(&self) -> u32 {
        self.begin_total
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }

    pub fn is_complete(&self) -> bool {
        self.destroyed == self.begin_total
    }

    /// Advance the visual debris timers
    pub fn tick_particles(&mut self) {
        for cell in &mut self.cells {
            cell.particle_ticks = cell.particle_ticks.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BRICK_HITS;

    fn arm(grid: &mut BrickGrid, row: usize, col: usize, solid: bool) {
        let cell = grid.cell_mut(row, col);
        cell.dead = false;
        cell.solid = solid;
        cell.hits_left = if solid { SOLID_BRICK_HITS } else { BRICK_HITS };
        cell.color = if solid {
            BrickColor::Steel
        } else {
            BrickColor::Green
        };
    }

    #[test]
    fn test_reset_positions_cells() {
        let grid = BrickGrid::new(3, 11);
        assert_eq!(grid.cell(0, 0).body.pos.x, GRID_START_X);
        assert_eq!(grid.cell(0, 0).body.pos.y, GRID_START_Y);
        assert_eq!(grid.cell(2, 4).body.pos.x, GRID_START_X + 4.0 * BRICK_W);
        assert_eq!(grid.cell(2, 4).body.pos.y, GRID_START_Y + 2.0 * BRICK_H);
        assert!(grid.cell(1, 1).dead);
    }

    #[test]
    fn test_reset_reuses_allocation() {
        let mut grid = BrickGrid::new(3, 11);
        arm(&mut grid, 0, 0, false);
        grid.mark_hit(0, 0);
        grid.reset(3, 11);
        assert!(grid.cell(0, 0).dead);
        assert_eq!(grid.destroyed(), 0);
    }

    #[test]
    fn test_breakable_dies_after_exact_hits() {
        let mut grid = BrickGrid::new(2, 2);
        arm(&mut grid, 0, 0, false);
        grid.cell_mut(0, 0).hits_left = 2;
        assert!(!grid.mark_hit(0, 0));
        assert!(!grid.cell(0, 0).dead);
        assert!(grid.mark_hit(0, 0));
        assert!(grid.cell(0, 0).dead);
        assert_eq!(grid.cell(0, 0).hits_left, 0);
    }

    #[test]
    fn test_solid_needs_full_count_and_never_completes() {
        let mut grid = BrickGrid::new(1, 2);
        arm(&mut grid, 0, 0, true);
        arm(&mut grid, 0, 1, false);
        grid.finalize_load();
        assert_eq!(grid.begin_total(), 1);

        grid.mark_hit(0, 0);
        grid.mark_hit(0, 0);
        assert!(!grid.cell(0, 0).dead);
        grid.mark_hit(0, 0);
        assert!(grid.cell(0, 0).dead);
        // Solid death never moves the completion counter
        assert_eq!(grid.destroyed(), 0);

        grid.mark_hit(0, 1);
        assert!(grid.is_complete());
    }

    #[test]
    fn test_smash_one_shots_solid() {
        let mut grid = BrickGrid::new(1, 1);
        arm(&mut grid, 0, 0, true);
        assert_eq!(grid.cell(0, 0).hits_left, SOLID_BRICK_HITS);
        assert!(grid.smash(0, 0));
        assert!(grid.cell(0, 0).dead);
        assert_eq!(grid.cell(0, 0).hits_left, 0);
    }

    #[test]
    fn test_hit_scan_row_major_first_wins() {
        let mut grid = BrickGrid::new(2, 2);
        arm(&mut grid, 0, 1, false);
        arm(&mut grid, 1, 0, false);
        arm(&mut grid, 1, 1, false);
        // A probe covering the whole grid resolves to the first live cell
        // in row-major order
        let probe = Body::new(
            glam::Vec2::new(GRID_START_X, GRID_START_Y),
            glam::Vec2::new(2.0 * BRICK_W, 2.0 * BRICK_H),
        );
        assert_eq!(grid.hit_scan(&probe), Some((0, 1)));
    }

    #[test]
    fn test_complete_iff_destroyed_equals_begin_total() {
        let mut grid = BrickGrid::new(1, 3);
        for col in 0..3 {
            arm(&mut grid, 0, col, false);
        }
        grid.finalize_load();
        assert_eq!(grid.begin_total(), 3);
        assert!(!grid.is_complete());
        grid.mark_hit(0, 0);
        grid.mark_hit(0, 1);
        assert!(!grid.is_complete());
        grid.mark_hit(0, 2);
        assert!(grid.is_complete());
        assert_eq!(grid.destroyed(), grid.begin_total());
    }
}
