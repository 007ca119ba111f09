//! Iterative depth-first graph construction with cycle detection.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use super::{AdjacencyMap, PackageId};
use crate::source::{GraphSource, SourceResult};

/// A back-edge discovered during construction.
///
/// `from` is the package whose dependency closed the cycle; `to` is the
/// ancestor on the active traversal path it points back to. Diagnostics are
/// reported per back-edge and never deduplicated: a package reached through
/// several back-edges appears once for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDiagnostic {
    /// Package whose dependency edge closed the cycle.
    pub from: PackageId,
    /// The in-progress ancestor that edge points back to.
    pub to: PackageId,
}

impl fmt::Display for CycleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The materialized dependency graph for one start package.
///
/// Produced by [`GraphBuilder::build`] and read-only afterwards: the reverse
/// index and every renderer take it by reference and derive their own
/// structures.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    adjacency: AdjacencyMap,
    root: PackageId,
    cycles: Vec<CycleDiagnostic>,
}

impl DependencyGraph {
    /// Returns the package the graph was built from.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the full adjacency map in discovery order.
    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Returns the direct dependencies of a package in declaration order.
    ///
    /// Unknown packages yield an empty slice.
    pub fn dependencies_of(&self, name: &str) -> &[PackageId] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all known packages in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageId> {
        self.adjacency.keys()
    }

    /// Returns the number of packages in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of recorded edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns true if the graph knows `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Returns the back-edge diagnostics recorded during construction.
    pub fn cycles(&self) -> &[CycleDiagnostic] {
        &self.cycles
    }

    /// Returns true if construction detected at least one cycle.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Returns true if the graph has no packages.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// One explicit stack frame: a node plus a cursor over its children.
///
/// Replaces recursive call state, so dependency-chain length is bounded by
/// heap, not the call stack.
struct Frame {
    node: PackageId,
    children: Vec<PackageId>,
    cursor: usize,
}

impl Frame {
    fn new(node: PackageId, children: Vec<PackageId>) -> Self {
        Self {
            node,
            children,
            cursor: 0,
        }
    }

    fn next_child(&mut self) -> Option<PackageId> {
        let child = self.children.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(child)
    }
}

/// Builds a [`DependencyGraph`] by walking a [`GraphSource`] depth-first.
///
/// The walk uses an explicit frame stack and two visitation sets: packages
/// on the current root-to-leaf path (for cycle detection) and packages whose
/// subtree is fully finished (so shared dependencies are expanded once).
/// Cycle detection is purely path-based: reaching an already-finished
/// package through a second path is normal diamond sharing, while an edge to
/// an on-path ancestor is a back-edge and gets a [`CycleDiagnostic`].
///
/// # Example
///
/// ```rust
/// use depscope::graph::GraphBuilder;
/// use depscope::source::FlatFileSource;
///
/// let source = FlatFileSource::parse_str("a: b\nb: a").unwrap();
/// let mut builder = GraphBuilder::new(source);
/// let graph = builder.build("a").unwrap();
///
/// assert!(graph.has_cycles());
/// assert_eq!(graph.cycles()[0].to_string(), "b -> a");
/// ```
pub struct GraphBuilder<S> {
    source: S,
}

impl<S: GraphSource> GraphBuilder<S> {
    /// Creates a builder reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Builds the graph reachable from `start`.
    ///
    /// Every visited edge is recorded exactly once, including edges into
    /// cycles and into already-finished packages; every package ever
    /// referenced ends up as an adjacency key. Cycles are diagnostics, not
    /// errors: the walk continues past them and `build` only fails when the
    /// source itself fails.
    pub fn build(&mut self, start: &str) -> SourceResult<DependencyGraph> {
        let mut adjacency: AdjacencyMap = IndexMap::new();
        let mut on_path: HashSet<PackageId> = HashSet::new();
        let mut finished: HashSet<PackageId> = HashSet::new();
        let mut cycles: Vec<CycleDiagnostic> = Vec::new();

        adjacency.entry(start.to_string()).or_default();
        let children = self.source.direct_dependencies_of(start)?;
        on_path.insert(start.to_string());
        let mut stack = vec![Frame::new(start.to_string(), children)];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.next_child() else {
                let done = frame.node.clone();
                stack.pop();
                on_path.remove(&done);
                finished.insert(done);
                continue;
            };
            let parent = frame.node.clone();

            adjacency.entry(child.clone()).or_default();
            adjacency.entry(parent.clone()).or_default().push(child.clone());

            if on_path.contains(&child) {
                tracing::warn!(from = %parent, to = %child, "dependency cycle detected");
                cycles.push(CycleDiagnostic {
                    from: parent,
                    to: child,
                });
                continue;
            }
            if finished.contains(&child) {
                continue;
            }

            let grandchildren = self.source.direct_dependencies_of(&child)?;
            on_path.insert(child.clone());
            stack.push(Frame::new(child, grandchildren));
        }

        Ok(DependencyGraph {
            adjacency,
            root: start.to_string(),
            cycles,
        })
    }
}
