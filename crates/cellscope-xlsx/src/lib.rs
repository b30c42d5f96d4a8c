//! # cellscope-xlsx
//!
//! XLSX workbook adapter for cellscope.
//!
//! Opens an `.xlsx` file and exposes its active (first) sheet as a
//! [`cellscope_core::SheetStore`], ready for dependency resolution. The
//! resolver itself depends only on the `CellStore` trait; this crate is
//! the file-format glue.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cellscope_xlsx::XlsxReader;
//!
//! let store = XlsxReader::read_file("book.xlsx")?;
//! let tree = cellscope_trace::resolve(&store, "C1")?;
//! ```

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
