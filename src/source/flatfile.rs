//! Flat-file dependency descriptions.
//!
//! Each record is one line: `name` for a package with no dependencies, or
//! `name: dep1, dep2, ...`. Blank lines and lines starting with `#` are
//! ignored. The whole file is parsed at construction; lookups afterwards
//! never fail.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use super::{GraphSource, SourceError, SourceResult};
use crate::graph::PackageId;

/// A [`GraphSource`] backed by a local flat-file description.
#[derive(Debug, Clone, Default)]
pub struct FlatFileSource {
    entries: IndexMap<PackageId, Vec<PackageId>>,
}

impl FlatFileSource {
    /// Loads and parses a description file from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the description file
    ///
    /// # Returns
    ///
    /// A `SourceResult` containing the parsed source or an error.
    pub fn load(path: &Path) -> SourceResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parses a description from a string.
    ///
    /// A package defined on several lines has its dependency lists
    /// concatenated in file order.
    ///
    /// # Example
    ///
    /// ```
    /// use depscope::source::FlatFileSource;
    ///
    /// let source = FlatFileSource::parse_str("\
    /// # demo project
    /// app: web, db
    /// web: db
    /// db
    /// ").unwrap();
    /// assert_eq!(source.package_count(), 3);
    /// ```
    pub fn parse_str(content: &str) -> SourceResult<Self> {
        let mut entries: IndexMap<PackageId, Vec<PackageId>> = IndexMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let number = index + 1;

            let (name, deps_part) = match line.split_once(':') {
                Some((name, rest)) => (name.trim(), Some(rest.trim())),
                None => (line, None),
            };
            if name.is_empty() {
                return Err(SourceError::InvalidRecord {
                    line: number,
                    message: "record has no package name".to_string(),
                });
            }

            let mut deps = Vec::new();
            if let Some(rest) = deps_part {
                if !rest.is_empty() {
                    for entry in rest.split(',') {
                        let dep = entry.trim();
                        if dep.is_empty() {
                            return Err(SourceError::InvalidRecord {
                                line: number,
                                message: format!("empty dependency entry for '{}'", name),
                            });
                        }
                        deps.push(dep.to_string());
                    }
                }
            }

            let slot = entries.entry(name.to_string()).or_default();
            if !slot.is_empty() {
                tracing::debug!(package = name, line = number, "extending earlier record");
            }
            slot.extend(deps);
        }

        Ok(Self { entries })
    }

    /// Returns the number of packages defined in the description.
    pub fn package_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the description defines `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl GraphSource for FlatFileSource {
    fn direct_dependencies_of(&mut self, id: &str) -> SourceResult<Vec<PackageId>> {
        Ok(self.entries.get(id).cloned().unwrap_or_default())
    }
}
