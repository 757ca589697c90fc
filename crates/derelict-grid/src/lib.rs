//! Tile grid storage for the Derelict hazard simulation.
//!
//! [`TileField`] holds the station's cells in flat row-major order behind
//! per-row shared pointers: cloning a field is O(rows), and mutation
//! duplicates only the rows actually touched in a turn. This preserves the
//! "new state per tick" functional-update contract without a full-grid
//! copy every step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;

pub use error::GridError;
pub use field::TileField;
