//! The [`TileField`]: flat row-major cell storage with per-row
//! copy-on-write sharing.

use std::sync::Arc;

use derelict_core::{Cell, GridPos};
use smallvec::SmallVec;

use crate::error::GridError;

/// The station's 2D grid of [`Cell`]s.
///
/// Rows are stored behind [`Arc`]s. `Clone` copies row pointers only; the
/// first mutation of a row after a clone duplicates that one row
/// (`Arc::make_mut`). A tick that touches a handful of rows therefore
/// shares the rest of the grid with its predecessor byte-for-byte.
///
/// All read accessors are total: an out-of-bounds position yields `None`
/// (or is skipped by the iteration helpers) rather than an error.
#[derive(Clone, Debug)]
pub struct TileField {
    width: u32,
    height: u32,
    rows: Vec<Arc<Vec<Cell>>>,
}

impl TileField {
    /// A `width` x `height` field filled with copies of `fill`.
    pub fn filled(width: u32, height: u32, fill: Cell) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let row = Arc::new(vec![fill; width as usize]);
        // Rows start shared; they fork on first write.
        let rows = (0..height).map(|_| Arc::clone(&row)).collect();
        Ok(Self {
            width,
            height,
            rows,
        })
    }

    /// Build a field from explicit rows (outer = y, inner = x).
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width as usize {
                return Err(GridError::RaggedRows {
                    expected: width as usize,
                    row: i,
                    got: row.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            rows: rows.into_iter().map(Arc::new).collect(),
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the field holds no cells. Construction forbids this; the
    /// method exists for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `pos` lies on the grid.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Flat row-major index of an in-bounds position.
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Read a cell. `None` out of bounds.
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.rows[pos.y as usize][pos.x as usize])
    }

    /// Mutable access to a cell, forking its row if shared. `None` out of
    /// bounds.
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let row = Arc::make_mut(&mut self.rows[pos.y as usize]);
        Some(&mut row[pos.x as usize])
    }

    /// All positions in row-major order — the canonical iteration order
    /// every deterministic pass uses.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPos::new(x, y)))
    }

    /// In-bounds orthogonal neighbours of `pos`, in the fixed
    /// north/south/west/east order.
    pub fn neighbours4(&self, pos: GridPos) -> SmallVec<[GridPos; 4]> {
        pos.orthogonal()
            .into_iter()
            .filter(|p| self.in_bounds(*p))
            .collect()
    }

    /// In-bounds orthogonal neighbours that are currently walkable.
    pub fn walkable_neighbours(&self, pos: GridPos) -> SmallVec<[GridPos; 4]> {
        pos.orthogonal()
            .into_iter()
            .filter(|p| self.get(*p).is_some_and(|c| c.walkable))
            .collect()
    }

    /// In-bounds cells within Manhattan distance `radius` of `center`,
    /// including the centre itself, in row-major order.
    ///
    /// Deliberately ignores walkability and walls — radiation and shield
    /// suppression act through structure.
    pub fn manhattan_disk(&self, center: GridPos, radius: u32) -> Vec<GridPos> {
        let r = radius as i32;
        let mut out = Vec::new();
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                let p = GridPos::new(center.x + dx, center.y + dy);
                if self.in_bounds(p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Number of rows whose storage is pointer-shared with `other`.
    ///
    /// Diagnostic for the copy-on-write contract: after a tick, every row
    /// the pipeline did not touch must still be shared with the prior
    /// state.
    pub fn shared_row_count(&self, other: &TileField) -> usize {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .filter(|(a, b)| Arc::ptr_eq(a, b))
            .count()
    }
}
