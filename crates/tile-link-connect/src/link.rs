use serde::{Deserialize, Serialize};
use tile_link_core::{Board, GridCoords, TileId};

/// Route joining two removable tiles.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPath {
    /// Same row or column with only empty cells in between.
    Direct,
    /// One horizontal and one vertical segment meeting at `corner`.
    Bend { corner: GridCoords },
}

/// Every cell strictly between `from_col` and `to_col` on `row` is present
/// and empty. The endpoints themselves are not inspected.
pub fn is_row_clear(board: &Board, row: i32, from_col: i32, to_col: i32) -> bool {
    let (lo, hi) = (from_col.min(to_col), from_col.max(to_col));
    (lo + 1..hi).all(|col| board.is_empty_at(GridCoords::new(col, row)))
}

/// Every cell strictly between `from_row` and `to_row` in `col` is present
/// and empty. The endpoints themselves are not inspected.
pub fn is_col_clear(board: &Board, col: i32, from_row: i32, to_row: i32) -> bool {
    let (lo, hi) = (from_row.min(to_row), from_row.max(to_row));
    (lo + 1..hi).all(|row| board.is_empty_at(GridCoords::new(col, row)))
}

fn same_live_tile(board: &Board, a: GridCoords, b: GridCoords) -> bool {
    match (board.id_at(a), board.id_at(b)) {
        (Some(ida), Some(idb)) => ida == idb && !matches!(ida, TileId::Empty),
        _ => false,
    }
}

fn directly_connected(board: &Board, a: GridCoords, b: GridCoords) -> bool {
    if a.col == b.col {
        is_col_clear(board, a.col, a.row, b.row)
    } else if a.row == b.row {
        is_row_clear(board, a.row, a.col, b.col)
    } else {
        false
    }
}

/// Horizontal from `a` to `b`'s column, then vertical into `b`.
fn horizontal_first(board: &Board, a: GridCoords, b: GridCoords) -> Option<GridCoords> {
    let corner = GridCoords::new(b.col, a.row);
    (is_row_clear(board, a.row, a.col, b.col)
        && is_col_clear(board, b.col, a.row, b.row)
        && board.is_empty_at(corner))
    .then_some(corner)
}

/// Vertical from `a` to `b`'s row, then horizontal into `b`.
fn vertical_first(board: &Board, a: GridCoords, b: GridCoords) -> Option<GridCoords> {
    let corner = GridCoords::new(a.col, b.row);
    (is_col_clear(board, a.col, a.row, b.row)
        && is_row_clear(board, b.row, a.col, b.col)
        && board.is_empty_at(corner))
    .then_some(corner)
}

/// Find the route that makes `a` and `b` removable, if any.
///
/// Queries with equal or undiscovered coordinates yield `None`.
pub fn find_link(board: &Board, a: GridCoords, b: GridCoords) -> Option<LinkPath> {
    if a == b || !same_live_tile(board, a, b) {
        return None;
    }
    if directly_connected(board, a, b) {
        return Some(LinkPath::Direct);
    }
    horizontal_first(board, a, b)
        .or_else(|| vertical_first(board, a, b))
        .map(|corner| LinkPath::Bend { corner })
}

/// Whether the tiles at `a` and `b` can be removed together.
pub fn eliminable(board: &Board, a: GridCoords, b: GridCoords) -> bool {
    find_link(board, a, b).is_some()
}
