//! Text renderers for dependency graphs.
//!
//! Three output shapes are supported: a flat edge list, Mermaid diagram
//! syntax, and an indented ASCII tree. Renderers are pure functions of the
//! graph writing to any [`Write`] sink, and their output is deterministic:
//! the same graph always renders to the same bytes.

pub mod edges;
pub mod mermaid;
pub mod tree;

pub use edges::EdgeListRenderer;
pub use mermaid::MermaidRenderer;
pub use tree::AsciiTreeRenderer;

use std::io::{self, Write};

use crate::graph::DependencyGraph;

/// Render format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Flat `parent -> child` edge listing.
    Edges,
    /// Mermaid diagram syntax.
    Mermaid,
    /// Indented ASCII tree.
    Tree,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edges" | "edge-list" => Ok(RenderFormat::Edges),
            "mermaid" => Ok(RenderFormat::Mermaid),
            "tree" | "ascii-tree" => Ok(RenderFormat::Tree),
            _ => Err(format!(
                "Unknown render format: '{}'. Valid formats: edges, mermaid, tree",
                s
            )),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Edges => write!(f, "edges"),
            RenderFormat::Mermaid => write!(f, "mermaid"),
            RenderFormat::Tree => write!(f, "tree"),
        }
    }
}

/// Trait for renderers.
pub trait Renderer {
    /// Render the graph to the given writer.
    fn render<W: Write>(&self, graph: &DependencyGraph, writer: &mut W) -> io::Result<()>;
}

/// Render the graph in the specified format.
pub fn render<W: Write>(
    format: RenderFormat,
    graph: &DependencyGraph,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        RenderFormat::Edges => EdgeListRenderer.render(graph, writer),
        RenderFormat::Mermaid => MermaidRenderer.render(graph, writer),
        RenderFormat::Tree => AsciiTreeRenderer.render(graph, writer),
    }
}

/// Render the graph to a string.
pub fn render_to_string(format: RenderFormat, graph: &DependencyGraph) -> io::Result<String> {
    let mut buffer = Vec::new();
    render(format, graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::source::FlatFileSource;

    fn diamond() -> DependencyGraph {
        let source = FlatFileSource::parse_str("a: b, c\nb: d\nc: d\nd").unwrap();
        GraphBuilder::new(source).build("a").unwrap()
    }

    #[test]
    fn test_render_format_from_str() {
        assert_eq!("edges".parse::<RenderFormat>().unwrap(), RenderFormat::Edges);
        assert_eq!(
            "edge-list".parse::<RenderFormat>().unwrap(),
            RenderFormat::Edges
        );
        assert_eq!(
            "Mermaid".parse::<RenderFormat>().unwrap(),
            RenderFormat::Mermaid
        );
        assert_eq!("tree".parse::<RenderFormat>().unwrap(), RenderFormat::Tree);
        assert_eq!(
            "ascii-tree".parse::<RenderFormat>().unwrap(),
            RenderFormat::Tree
        );
        assert!("dot".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_render_format_display() {
        assert_eq!(format!("{}", RenderFormat::Edges), "edges");
        assert_eq!(format!("{}", RenderFormat::Mermaid), "mermaid");
        assert_eq!(format!("{}", RenderFormat::Tree), "tree");
    }

    #[test]
    fn test_render_dispatch() {
        let graph = diamond();

        let edges = render_to_string(RenderFormat::Edges, &graph).unwrap();
        assert!(edges.starts_with("a -> b"));

        let mermaid = render_to_string(RenderFormat::Mermaid, &graph).unwrap();
        assert!(mermaid.starts_with("graph TD"));

        let tree = render_to_string(RenderFormat::Tree, &graph).unwrap();
        assert!(tree.starts_with("a\n"));
    }

    #[test]
    fn test_end_to_end_diamond() {
        // The full pipeline over the canonical diamond description.
        let graph = diamond();

        assert_eq!(
            render_to_string(RenderFormat::Edges, &graph).unwrap(),
            "a -> b\na -> c\nb -> d\nc -> d\n"
        );

        let index = crate::graph::ReverseIndex::from_graph(&graph);
        assert_eq!(index.transitive_dependents("d"), ["a", "b", "c"]);
    }
}
