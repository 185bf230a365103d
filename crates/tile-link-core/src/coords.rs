//! Logical grid coordinates and their pixel-space footprint.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Logical cell coordinate. `(0, 0)` is the calibration anchor; columns grow
/// to the right and rows grow downwards, independent of pixels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GridCoords {
    pub col: i32,
    pub row: i32,
}

impl GridCoords {
    pub const ORIGIN: GridCoords = GridCoords { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Translate by whole cells.
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Four cardinal neighbors in the order right, left, down, up.
    pub fn neighbors(self) -> [GridCoords; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl From<(i32, i32)> for GridCoords {
    fn from((col, row): (i32, i32)) -> Self {
        Self { col, row }
    }
}

/// Axis-aligned pixel rectangle in frame coordinates.
///
/// The origin may be negative: rectangles are derived for coordinates that
/// lie outside the frame and then rejected by the frame bounds check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub origin: Point2<i32>,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Point2::new(x, y),
            width,
            height,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.origin.y
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.origin.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.height as i64
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the whole rectangle lies inside a `width x height` frame.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.origin.x >= 0
            && self.origin.y >= 0
            && self.right() <= width as i64
            && self.bottom() <= height as i64
    }

    pub fn translated(&self, delta: Vector2<i32>) -> Self {
        Self {
            origin: self.origin + delta,
            ..*self
        }
    }
}

/// Fixed per-cell geometry of the board on screen.
///
/// Defaults are the measured values of the target game at 100% scaling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPitch {
    /// Tile width in pixels.
    pub cell_width: u32,
    /// Tile height in pixels.
    pub cell_height: u32,
    /// Horizontal gap between neighbouring tiles.
    pub h_gap: u32,
    /// Vertical gap between neighbouring tiles.
    pub v_gap: u32,
}

impl Default for GridPitch {
    fn default() -> Self {
        Self {
            cell_width: 78,
            cell_height: 82,
            h_gap: 7,
            v_gap: 3,
        }
    }
}

impl GridPitch {
    /// Pixel displacement between a cell and its right/lower neighbour.
    pub fn step(&self) -> Vector2<i32> {
        Vector2::new(
            (self.cell_width + self.h_gap) as i32,
            (self.cell_height + self.v_gap) as i32,
        )
    }
}

/// The calibrated pixel rectangle of logical cell `(0, 0)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub rect: PixelRect,
}

impl Anchor {
    pub fn new(rect: PixelRect) -> Self {
        Self { rect }
    }

    /// Anchor at pixel `(x, y)` sized to one cell of `pitch`.
    pub fn at(x: i32, y: i32, pitch: &GridPitch) -> Self {
        Self {
            rect: PixelRect::new(x, y, pitch.cell_width, pitch.cell_height),
        }
    }

    /// Pixel rectangle of `coords`. The grid is rigid: every cell is the
    /// anchor rectangle translated by whole pitch steps.
    pub fn rect_for(&self, coords: GridCoords, pitch: &GridPitch) -> PixelRect {
        let step = pitch.step();
        self.rect
            .translated(Vector2::new(coords.col * step.x, coords.row * step.y))
    }
}
