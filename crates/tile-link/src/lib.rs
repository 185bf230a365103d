//! High-level facade crate for the `tile-link-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates,
//! - [`HintSession`], which calibrates the anchor cell once and then rebuilds
//!   the board from every new frame,
//! - [`analyze_frame`] for one-off analysis with a known anchor,
//! - JSON configuration and report helpers in [`io`],
//! - (feature `cli`) the `tile-link` command line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use tile_link::{frame_view, HintSession, TileLinkConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TileLinkConfig::load_json("tile-link.json")?;
//! let mut session = HintSession::from_config(&config)?;
//!
//! let frame = image::open("frame.png")?.to_rgb8();
//! session.process(frame_view(&frame))?;
//! if let Some((a, b)) = session.hint() {
//!     println!("remove ({}, {}) and ({}, {})", a.col, a.row, b.col, b.row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `tile_link::core`: grid coordinates, pixel rectangles, boards, frame views.
//! - `tile_link::grid`: breadth-first board discovery from the anchor cell.
//! - `tile_link::connect`: elimination rule and pair enumeration.
//! - `tile_link::template`: template loading, classification, calibration.

pub use tile_link_connect as connect;
pub use tile_link_core as core;
pub use tile_link_grid as grid;
pub use tile_link_template as template;

pub use tile_link_connect::{eliminable, find_link, find_pairs, LinkPath, PairFinder};
pub use tile_link_core::{
    Anchor, Board, Cell, Classifier, FrameView, GridCoords, GridPitch, PixelRect, TileId,
};
pub use tile_link_template::{
    calibrate, frame_view, load_templates, Calibration, TemplateClassifier, TemplateSet,
};

pub mod io;
mod pipeline;

pub use io::{CellReport, ConfigIoError, FrameReport, PairReport, TileLinkConfig};
pub use pipeline::{analyze_frame, FrameAnalysis, HintSession, SessionError};
