//! Core types for the tile-link workspace.
//!
//! This crate is intentionally small and purely geometric. It defines the
//! logical grid (`GridCoords`), how a logical cell maps onto frame pixels
//! (`Anchor` + `GridPitch` -> `PixelRect`), the sparse `Board` produced by
//! discovery, lightweight RGB frame views, and the `Classifier` capability
//! that turns a frame patch into a tile identity.
//!
//! It does *not* depend on any concrete image type or matching algorithm.

mod board;
mod classifier;
mod coords;
mod image;
mod logger;
mod tile;

pub use board::{Board, BoardBounds, Cell};
pub use classifier::Classifier;
pub use coords::{Anchor, GridCoords, GridPitch, PixelRect};
pub use image::{FramePatch, FrameView};
pub use tile::{TileId, DEFAULT_EMPTY_NAME};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
