//! Mermaid diagram renderer.

use std::collections::HashSet;
use std::io::{self, Write};

use super::Renderer;
use crate::graph::DependencyGraph;

/// Renders the graph as Mermaid flowchart syntax.
///
/// Output starts with a fixed `graph TD` direction declaration followed by
/// one indented `parent --> child` line per distinct edge, in the same
/// first-seen order as the edge-list renderer. The adjacency map iterates in
/// insertion order, so identical graphs produce byte-identical output.
pub struct MermaidRenderer;

impl Renderer for MermaidRenderer {
    fn render<W: Write>(&self, graph: &DependencyGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "graph TD")?;

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for (parent, children) in graph.adjacency() {
            for child in children {
                if seen.insert((parent.as_str(), child.as_str())) {
                    writeln!(writer, "    {} --> {}", parent, child)?;
                }
            }
        }

        Ok(())
    }
}
