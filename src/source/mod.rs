//! Dependency sources for graph construction.
//!
//! A [`GraphSource`] supplies the direct dependencies of a package by name.
//! Two implementations are provided:
//!
//! - **flat file** - a local `name: dep1, dep2` description, parsed once up
//!   front
//! - **maven** - POM manifests fetched on demand from a remote repository
//!
//! # Example
//!
//! ```
//! use depscope::source::{FlatFileSource, GraphSource};
//!
//! let mut source = FlatFileSource::parse_str("app: lib\nlib").unwrap();
//! assert_eq!(source.direct_dependencies_of("app").unwrap(), vec!["lib"]);
//! assert!(source.direct_dependencies_of("unknown").unwrap().is_empty());
//! ```

pub mod flatfile;
pub mod maven;

pub use flatfile::FlatFileSource;
pub use maven::MavenSource;

use crate::graph::PackageId;

/// Errors raised when a source cannot supply dependency data.
///
/// These cover source-unavailable conditions only. An id the source has no
/// record of is not an error; lookups for unknown packages return an empty
/// list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to read the local description file.
    #[error("Failed to read description file: {0}")]
    IoError(#[from] std::io::Error),

    /// The local description file contains a malformed record.
    #[error("Invalid description at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// A remote manifest could not be fetched.
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// A remote manifest was fetched but could not be parsed.
    #[error("Failed to parse manifest {url}: {message}")]
    InvalidManifest { url: String, message: String },
}

/// Result type alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Supplies direct-dependency lists for packages.
///
/// Implementations must return an empty list for packages they have no data
/// for and reserve errors for source-unavailable conditions; the graph
/// builder propagates those to its caller untouched. Lookups take `&mut self`
/// so that remote sources can memoize fetched manifests.
pub trait GraphSource {
    /// Returns the direct dependencies of `id` in declaration order.
    fn direct_dependencies_of(&mut self, id: &str) -> SourceResult<Vec<PackageId>>;
}

impl<S: GraphSource + ?Sized> GraphSource for Box<S> {
    fn direct_dependencies_of(&mut self, id: &str) -> SourceResult<Vec<PackageId>> {
        (**self).direct_dependencies_of(id)
    }
}
