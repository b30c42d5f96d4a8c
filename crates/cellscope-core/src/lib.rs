//! # cellscope-core
//!
//! Core data structures for the cellscope dependency tracer.
//!
//! This crate provides the fundamental types used throughout cellscope:
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`CellContent`] - Tagged literal/formula cell content
//! - [`Cell`] - The immutable resolved-cell value object
//! - [`CellStore`] - The narrow read interface resolution runs against,
//!   with [`SheetStore`] as the in-memory implementation
//!
//! ## Example
//!
//! ```rust
//! use cellscope_core::{CellAddress, CellStore, SheetStore};
//!
//! let mut store = SheetStore::new("Sheet1");
//! store.set_value("A1", 5.0).unwrap();
//! store.set_formula("B1", "=A1*2").unwrap();
//!
//! let b1 = CellAddress::parse("B1").unwrap();
//! assert!(store.content(&b1).unwrap().is_formula());
//! ```

pub mod address;
pub mod cell;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use cell::{Cell, CellContent};
pub use error::{Error, Result};
pub use store::{CellStore, SheetStore};

/// Maximum number of rows in a sheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
