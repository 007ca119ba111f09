//! Indented ASCII tree renderer.

use std::collections::HashSet;
use std::io::{self, Write};

use super::Renderer;
use crate::graph::DependencyGraph;

/// Marker appended to a package already shown earlier in the same render.
const REPEAT_MARKER: &str = " (*)";

/// Renders the graph as an indented tree rooted at the start package.
///
/// Children are deduplicated and sorted lexicographically (readability wins
/// over declaration order here). Non-last children get a `├── ` connector
/// with a `│   ` continuation for their subtree; the last child gets `└── `
/// with a blank continuation. A package already rendered anywhere earlier in
/// the walk is annotated with ` (*)` and not expanded again, so shared and
/// cyclic structure cannot loop the output.
///
/// Like graph construction, the walk keeps its own frame stack instead of
/// recursing.
pub struct AsciiTreeRenderer;

/// Pending children of one rendered node.
struct Frame<'a> {
    children: Vec<&'a str>,
    cursor: usize,
    prefix: String,
}

impl Renderer for AsciiTreeRenderer {
    fn render<W: Write>(&self, graph: &DependencyGraph, writer: &mut W) -> io::Result<()> {
        let root = graph.root();
        writeln!(writer, "{}", root)?;

        let mut rendered: HashSet<&str> = HashSet::new();
        rendered.insert(root);

        let mut stack = vec![Frame {
            children: sorted_children(graph, root),
            cursor: 0,
            prefix: String::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.cursor >= frame.children.len() {
                stack.pop();
                continue;
            }
            let child = frame.children[frame.cursor];
            frame.cursor += 1;

            let is_last = frame.cursor == frame.children.len();
            let connector = if is_last { "└── " } else { "├── " };
            let line_prefix = frame.prefix.clone();
            let child_prefix = format!(
                "{}{}",
                frame.prefix,
                if is_last { "    " } else { "│   " }
            );

            if !rendered.insert(child) {
                writeln!(writer, "{}{}{}{}", line_prefix, connector, child, REPEAT_MARKER)?;
                continue;
            }
            writeln!(writer, "{}{}{}", line_prefix, connector, child)?;

            let grandchildren = sorted_children(graph, child);
            if !grandchildren.is_empty() {
                stack.push(Frame {
                    children: grandchildren,
                    cursor: 0,
                    prefix: child_prefix,
                });
            }
        }

        Ok(())
    }
}

/// The distinct children of `node`, sorted lexicographically.
fn sorted_children<'a>(graph: &'a DependencyGraph, node: &str) -> Vec<&'a str> {
    let mut children: Vec<&str> = graph
        .dependencies_of(node)
        .iter()
        .map(String::as_str)
        .collect();
    children.sort_unstable();
    children.dedup();
    children
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
        render_to_string(RenderFormat::Tree, &graph).unwrap()
    }

    #[test]
    fn test_tree_single_node() {
        assert_eq!(render("solo", "solo"), "solo\n");
    }

    #[test]
    fn test_tree_connectors_and_continuations() {
        let output = render("a: b, c\nb: d\nc\nd", "a");

        assert_eq!(
            output,
            "a\n\
             ├── b\n\
             │   └── d\n\
             └── c\n"
        );
    }

    #[test]
    fn test_tree_diamond_marks_repeat() {
        let output = render("a: b, c\nb: d\nc: d\nd", "a");

        assert_eq!(
            output,
            "a\n\
             ├── b\n\
             │   └── d\n\
             └── c\n\
                 └── d (*)\n"
        );
    }

    #[test]
    fn test_tree_back_edge_does_not_recurse() {
        let output = render("a: b\nb: a", "a");

        assert_eq!(
            output,
            "a\n\
             └── b\n\
                 └── a (*)\n"
        );
    }

    #[test]
    fn test_tree_children_sorted_not_declaration_order() {
        let output = render("a: c, b\nb\nc", "a");

        assert_eq!(
            output,
            "a\n\
             ├── b\n\
             └── c\n"
        );
    }

    #[test]
    fn test_tree_duplicate_children_rendered_once() {
        let output = render("a: b, b\nb", "a");

        assert_eq!(
            output,
            "a\n\
             └── b\n"
        );
    }

    #[test]
    fn test_tree_self_loop() {
        let output = render("a: a", "a");

        assert_eq!(
            output,
            "a\n\
             └── a (*)\n"
        );
    }

    #[test]
    fn test_tree_deep_nesting_prefixes() {
        let output = render("a: b, e\nb: c\nc: d\nd\ne", "a");

        assert_eq!(
            output,
            "a\n\
             ├── b\n\
             │   └── c\n\
             │       └── d\n\
             └── e\n"
        );
    }
}
