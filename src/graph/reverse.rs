//! Reverse-dependency index and transitive dependents queries.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{DependencyGraph, PackageId};

/// The edge-inverted view of a [`DependencyGraph`].
///
/// Maps each package to the set of packages that directly list it as a
/// dependency (repeated edges collapse to one dependent). Built in one pass
/// over the graph and reused for every query in the session; queries never
/// mutate it.
///
/// # Example
///
/// ```rust
/// use depscope::graph::{GraphBuilder, ReverseIndex};
/// use depscope::source::FlatFileSource;
///
/// let source = FlatFileSource::parse_str("a: b, c\nb: d\nc: d\nd").unwrap();
/// let graph = GraphBuilder::new(source).build("a").unwrap();
/// let index = ReverseIndex::from_graph(&graph);
///
/// assert_eq!(index.transitive_dependents("d"), ["a", "b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct ReverseIndex {
    dependents: HashMap<PackageId, HashSet<PackageId>>,
}

impl ReverseIndex {
    /// Derives the reverse adjacency map from a built graph.
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let mut dependents: HashMap<PackageId, HashSet<PackageId>> = HashMap::new();

        for (parent, children) in graph.adjacency() {
            for child in children {
                dependents
                    .entry(child.clone())
                    .or_default()
                    .insert(parent.clone());
            }
        }

        tracing::debug!(targets = dependents.len(), "reverse index built");
        Self { dependents }
    }

    /// Returns the packages that directly depend on `target`, sorted.
    pub fn direct_dependents(&self, target: &str) -> Vec<&str> {
        let mut result: Vec<&str> = self
            .dependents
            .get(target)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        result.sort_unstable();
        result
    }

    /// Returns every package that transitively depends on `target`, sorted
    /// ascending.
    ///
    /// Breadth-first over the reverse map; each dependent is expanded once.
    /// The target itself is excluded even when a cycle routes back to it,
    /// and a target the graph does not know yields an empty list rather than
    /// an error.
    pub fn transitive_dependents(&self, target: &str) -> Vec<PackageId> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        if let Some(direct) = self.dependents.get(target) {
            for dependent in direct.iter().map(String::as_str) {
                if dependent != target && visited.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        while let Some(current) = queue.pop_front() {
            if let Some(upstream) = self.dependents.get(current) {
                for dependent in upstream.iter().map(String::as_str) {
                    if dependent != target && visited.insert(dependent) {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        let mut result: Vec<PackageId> = visited.into_iter().map(String::from).collect();
        result.sort_unstable();
        result
    }
}
