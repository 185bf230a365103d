use std::iter::FusedIterator;

use tile_link_core::{Board, GridCoords};

use crate::link::eliminable;

/// Enumerates removable pairs of a board.
///
/// Pairs come out in discovery order: the outer index walks the board's
/// discovery sequence and the inner index every later coordinate, so each
/// unordered pair is examined once with `a` preceding `b`. No other ordering
/// is implied; in particular this is not row-major order.
#[derive(Clone, Copy, Debug)]
pub struct PairFinder<'a> {
    board: &'a Board,
}

impl<'a> PairFinder<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// A fresh lazy pass over all removable pairs.
    pub fn pairs(&self) -> Pairs<'a> {
        Pairs {
            board: self.board,
            i: 0,
            j: 1,
        }
    }

    /// The first removable pair, used as the single hint.
    pub fn first_pair(&self) -> Option<(GridCoords, GridCoords)> {
        self.pairs().next()
    }
}

impl<'a> IntoIterator for &PairFinder<'a> {
    type Item = (GridCoords, GridCoords);
    type IntoIter = Pairs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs()
    }
}

/// Lazy iterator returned by [`PairFinder::pairs`].
#[derive(Clone, Debug)]
pub struct Pairs<'a> {
    board: &'a Board,
    i: usize,
    j: usize,
}

impl Iterator for Pairs<'_> {
    type Item = (GridCoords, GridCoords);

    fn next(&mut self) -> Option<Self::Item> {
        let coords = self.board.coords();
        while self.i < coords.len() {
            while self.j < coords.len() {
                let (a, b) = (coords[self.i], coords[self.j]);
                self.j += 1;
                if eliminable(self.board, a, b) {
                    return Some((a, b));
                }
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}

impl FusedIterator for Pairs<'_> {}

/// Collect every removable pair of `board`.
pub fn find_pairs(board: &Board) -> Vec<(GridCoords, GridCoords)> {
    PairFinder::new(board).pairs().collect()
}
