//! Elimination rules on a discovered board.
//!
//! Two tiles can be removed together when they carry the same non-empty
//! identity and a path joins them that is either a straight line or has one
//! 90° bend, and passes only through cells known to be empty. Undiscovered
//! coordinates always block a path.
//!
//! [`PairFinder`] enumerates every removable pair in discovery order.

mod link;
mod pairs;

pub use link::{eliminable, find_link, is_col_clear, is_row_clear, LinkPath};
pub use pairs::{find_pairs, PairFinder, Pairs};
