//! Graph construction and traversal engine.
//!
//! [`GraphBuilder`] walks a [`crate::source::GraphSource`] depth-first with
//! an explicit stack, detects cycles, and materializes a [`DependencyGraph`];
//! [`ReverseIndex`] derives the inverted view for "who depends on X" queries.
//!
//! # Example
//!
//! ```rust
//! use depscope::graph::GraphBuilder;
//! use depscope::source::FlatFileSource;
//!
//! let source = FlatFileSource::parse_str("a: b, c\nb: d\nc: d\nd").unwrap();
//! let mut builder = GraphBuilder::new(source);
//! let graph = builder.build("a").unwrap();
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 4);
//! assert_eq!(graph.dependencies_of("a"), ["b", "c"]);
//! ```

mod builder;
mod reverse;

pub use builder::{CycleDiagnostic, DependencyGraph, GraphBuilder};
pub use reverse::ReverseIndex;

use indexmap::IndexMap;

/// Opaque package identifier. Local descriptions use bare names; remote
/// sources use `group:artifact:version` coordinates. The graph engine
/// assumes no internal structure.
pub type PackageId = String;

/// Adjacency map from a package to its direct dependencies.
///
/// Keys keep discovery order and dependency lists keep declaration order;
/// duplicate entries are preserved. After construction every id appearing in
/// any list is also a key, possibly mapped to an empty list.
pub type AdjacencyMap = IndexMap<PackageId, Vec<PackageId>>;
