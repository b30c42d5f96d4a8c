//! # cellscope-trace
//!
//! Dependency resolution engine for cellscope.
//!
//! This crate provides:
//! - Reference extraction (formula text → referenced addresses, ranges
//!   expanded)
//! - Dependency resolution (root cell → shared-node dependency tree,
//!   with cycle detection and a depth bound)
//! - Edge-list export for graph consumers
//!
//! ## Example
//!
//! ```rust
//! use cellscope_core::SheetStore;
//! use cellscope_trace::{resolve, to_edges};
//!
//! let mut store = SheetStore::new("Sheet1");
//! store.set_value("A1", 5.0).unwrap();
//! store.set_value("B1", 10.0).unwrap();
//! store.set_formula("C1", "=A1+B1").unwrap();
//!
//! let tree = resolve(&store, "C1").unwrap();
//! let edges = to_edges(&tree);
//! assert_eq!(edges.len(), 2);
//! ```

pub mod extract;
pub mod graph;
pub mod resolve;

pub use extract::extract_refs;
pub use graph::{to_edges, Edge};
pub use resolve::{
    resolve, resolve_with_options, DependencyNode, DependencyTree, NodeId, ResolveOptions,
    ResolveStats, Resolver,
};
