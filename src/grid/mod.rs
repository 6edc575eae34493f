// src/grid/mod.rs
//! Booking-grid core: turns the site's HTML table rows into per-room
//! week-bitmask sequences. Pure string and number transforms; the only
//! side effect in this tree is anomaly logging.
//!
//! Layering:
//! - `segment` splits a table's rows into per-day blocks, keyed by the
//!   day header labels in first-seen order.
//! - `shape` fixes each day block up: hour alignment, room-major
//!   transposition, half-hour compaction.
//! - `cells` reads one booking cell into a week bitmask under the
//!   term's teaching mask.

pub mod cells;
pub mod segment;
pub mod shape;

/// One teaching week per bit.
pub type WeekBits = u64;

/// A booking table row: the leading label cell's text, plus the raw
/// inner HTML of each booking cell. The label cell itself and the
/// trailing decorative cell are already stripped by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub label: String,
    pub cells: Vec<String>,
}
