//! Flat edge-list renderer.

use std::collections::HashSet;
use std::io::{self, Write};

use super::Renderer;
use crate::graph::DependencyGraph;

/// Renders one `parent -> child` line per distinct directed edge.
///
/// Edges appear in first-seen order over the adjacency map; an edge the
/// builder recorded more than once is emitted once.
pub struct EdgeListRenderer;

impl Renderer for EdgeListRenderer {
    fn render<W: Write>(&self, graph: &DependencyGraph, writer: &mut W) -> io::Result<()> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();

        for (parent, children) in graph.adjacency() {
            for child in children {
                if seen.insert((parent.as_str(), child.as_str())) {
                    writeln!(writer, "{} -> {}", parent, child)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::render::{render_to_string, RenderFormat};
    use crate::source::FlatFileSource;

    fn render(description: &str, start: &str) -> String {
        let source = FlatFileSource::parse_str(description).unwrap();
        let graph = GraphBuilder::new(source).build(start).unwrap();
        render_to_string(RenderFormat::Edges, &graph).unwrap()
    }

    #[test]
    fn test_edges_first_seen_order() {
        let output = render("a: b, c\nb: d\nc: d\nd", "a");
        assert_eq!(output, "a -> b\na -> c\nb -> d\nc -> d\n");
    }

    #[test]
    fn test_duplicate_edges_emitted_once() {
        let output = render("a: b, b\nb", "a");
        assert_eq!(output, "a -> b\n");
    }

    #[test]
    fn test_cycle_edges_included() {
        let output = render("a: b\nb: a", "a");
        assert_eq!(output, "a -> b\nb -> a\n");
    }

    #[test]
    fn test_empty_graph_renders_nothing() {
        let output = render("solo", "solo");
        assert_eq!(output, "");
    }
}
