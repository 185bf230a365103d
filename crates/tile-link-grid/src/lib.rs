//! Board discovery from a single calibrated anchor cell.
//!
//! Algorithm:
//! 1. Seed a FIFO frontier with logical cell `(0, 0)`.
//! 2. For each dequeued coordinate derive its pixel rectangle from the anchor
//!    and the fixed grid pitch.
//! 3. Out-of-frame or degenerate rectangles are dropped. So are patches the
//!    classifier reports as unknown.
//! 4. Every other coordinate is recorded with its identity and its four
//!    cardinal neighbors are enqueued once.
//!
//! Dropped coordinates never expand, so discovery stops at the physical edge
//! of the frame and at whatever the classifier refuses to recognize.

mod mapper;

pub use mapper::{discover, GridMapper, Probe};
