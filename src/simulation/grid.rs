//! # Uniform spatial grid (2D)
//!
//! Broad-phase acceleration structure for the collision system. The world
//! rectangle is cut into square cells of side `cell_size`; every tick each
//! body index is bucketed into the one cell that contains its centre.
//!
//! - [`Bounds`]   – the world rectangle, also used for boundary collisions
//! - [`GridInfo`] – rectangle + cell size + derived cell counts
//! - [`Grid`]     – one bucket of body indices per cell
//!
//! The grid holds no history: it is cleared and repopulated every tick, so a
//! stale bucket can live for at most one tick (or until a body is removed,
//! which clears it early).

use super::states::Body;
use super::vector::NVec2;

/// Smallest cell side used when a degenerate cell size is replaced
pub const MIN_CELL_SIZE: f64 = 1e-3;

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(-100.0, 100.0, -100.0, 100.0)
    }
}

/// Grid geometry: rectangle, cell size and the derived cell counts
#[derive(Debug, Clone, PartialEq)]
pub struct GridInfo {
    pub bounds: Bounds,
    pub cell_size: f64,
    pub num_cells_x: usize,
    pub num_cells_y: usize,
}

impl GridInfo {
    /// Derive `num_cells_x/y = ceil(extent / cell_size)`, at least one cell per axis
    ///
    /// A non-positive or non-finite `cell_size` falls back to a single cell
    /// spanning the whole rectangle.
    pub fn new(bounds: Bounds, cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            let fallback = bounds.width().max(bounds.height()).max(MIN_CELL_SIZE);
            log::warn!("invalid cell size {cell_size}, using a single {fallback} cell");
            fallback
        };
        let num_cells_x = ((bounds.width() / cell_size).ceil() as usize).max(1);
        let num_cells_y = ((bounds.height() / cell_size).ceil() as usize).max(1);
        Self {
            bounds,
            cell_size,
            num_cells_x,
            num_cells_y,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.num_cells_x * self.num_cells_y
    }

    /// Column/row of the cell containing `p`, or `None` outside the rectangle
    ///
    /// Points on `max_x`/`max_y` land in the last column/row.
    pub fn cell_coords(&self, p: &NVec2) -> Option<(usize, usize)> {
        if !self.bounds.contains(p) {
            return None;
        }
        let cx = ((p.x - self.bounds.min_x) / self.cell_size).floor() as usize;
        let cy = ((p.y - self.bounds.min_y) / self.cell_size).floor() as usize;
        Some((cx.min(self.num_cells_x - 1), cy.min(self.num_cells_y - 1)))
    }

    /// Flat cell index `cx + cy * num_cells_x`, or `None` outside the rectangle
    pub fn index_of(&self, p: &NVec2) -> Option<usize> {
        self.cell_coords(p).map(|(cx, cy)| cx + cy * self.num_cells_x)
    }
}

/// Per-cell buckets of body indices
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: Vec<Vec<usize>>,
}

impl Grid {
    pub fn new(info: &GridInfo) -> Self {
        let mut grid = Self::default();
        grid.resize(info);
        grid
    }

    /// Match the cell array to `info`, dropping all contents
    pub fn resize(&mut self, info: &GridInfo) {
        self.cells.clear();
        self.cells.resize_with(info.cell_count(), Vec::new);
    }

    /// Empty every cell, keeping the allocations
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
    }

    /// Bucket every in-bounds body into the cell holding its centre
    pub fn repopulate(&mut self, info: &GridInfo, bodies: &[Body]) {
        for (i, body) in bodies.iter().enumerate() {
            if let Some(idx) = info.index_of(&body.position) {
                self.cells[idx].push(i);
            }
        }
    }

    /// `clear` followed by `repopulate`
    pub fn rebuild(&mut self, info: &GridInfo, bodies: &[Body]) {
        if self.cells.len() != info.cell_count() {
            self.resize(info);
        }
        self.clear();
        self.repopulate(info, bodies);
    }

    pub fn cell(&self, index: usize) -> &[usize] {
        &self.cells[index]
    }

    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of bucketed body references across all cells
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}
