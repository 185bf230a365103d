//! Sparse board produced by one discovery cycle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{GridCoords, PixelRect, TileId};

/// One discovered board slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: TileId,
    pub bounds: PixelRect,
}

/// Inclusive logical extent of a board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoardBounds {
    pub min: GridCoords,
    pub max: GridCoords,
}

impl BoardBounds {
    pub fn cols(&self) -> u32 {
        (self.max.col - self.min.col + 1) as u32
    }

    pub fn rows(&self) -> u32 {
        (self.max.row - self.min.row + 1) as u32
    }
}

/// Sparse mapping from logical coordinates to discovered cells.
///
/// A missing key means "undiscovered", which is distinct from a present
/// [`TileId::Empty`] cell. Iteration follows discovery order, which is kept
/// as an explicit sequence next to the lookup map.
///
/// Boards are assembled once through [`FromIterator`] and are read-only
/// afterwards. If a coordinate repeats in the input, the first cell wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: HashMap<GridCoords, Cell>,
    order: Vec<GridCoords>,
}

impl Board {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, coords: GridCoords) -> Option<&Cell> {
        self.cells.get(&coords)
    }

    pub fn contains(&self, coords: GridCoords) -> bool {
        self.cells.contains_key(&coords)
    }

    pub fn id_at(&self, coords: GridCoords) -> Option<&TileId> {
        self.cells.get(&coords).map(|c| &c.id)
    }

    /// Present *and* holding no tile. Undiscovered coordinates are not empty.
    #[inline]
    pub fn is_empty_at(&self, coords: GridCoords) -> bool {
        matches!(self.id_at(coords), Some(TileId::Empty))
    }

    /// Coordinates in discovery order.
    pub fn coords(&self) -> &[GridCoords] {
        &self.order
    }

    /// `(coords, cell)` pairs in discovery order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (GridCoords, &Cell)> + '_ {
        self.order.iter().map(move |g| (*g, &self.cells[g]))
    }

    /// Inclusive min/max logical coordinates, `None` for an empty board.
    pub fn bounds(&self) -> Option<BoardBounds> {
        let first = *self.order.first()?;
        let mut min = first;
        let mut max = first;
        for g in &self.order {
            min.col = min.col.min(g.col);
            min.row = min.row.min(g.row);
            max.col = max.col.max(g.col);
            max.row = max.row.max(g.row);
        }
        Some(BoardBounds { min, max })
    }
}

impl FromIterator<(GridCoords, Cell)> for Board {
    fn from_iter<I: IntoIterator<Item = (GridCoords, Cell)>>(iter: I) -> Self {
        let mut board = Board::default();
        for (coords, cell) in iter {
            if board.cells.contains_key(&coords) {
                continue;
            }
            board.cells.insert(coords, cell);
            board.order.push(coords);
        }
        board
    }
}
