use crate::snapshot::{NodeLabel, NodeShape, TreeSnapshot};

const SENTINEL_FILL: &str = "lightblue";
const LEAF_FILL: &str = "lightgreen";

/// Render a snapshot as a Graphviz digraph.
///
/// Node text is `order / weight / label`; edges carry their code bit.
pub fn render_dot(snapshot: &TreeSnapshot) -> String {
    let mut out = String::from("digraph huffman {\n  node [fontname=\"monospace\"];\n");

    for node in snapshot.nodes() {
        let shape = match node.shape {
            NodeShape::Internal => "circle",
            NodeShape::Leaf => "box",
        };
        let fill = match node.label {
            NodeLabel::Sentinel => Some(SENTINEL_FILL),
            NodeLabel::Symbol(_) => Some(LEAF_FILL),
            NodeLabel::Internal => None,
        };
        let text = escape(&format!("{} / {} / {}", node.order, node.weight, node.label));

        out.push_str(&format!("  n{} [shape={shape}, label=\"{text}\"", node.order));
        if let Some(fill) = fill {
            out.push_str(&format!(", style=filled, fillcolor={fill}"));
        }
        out.push_str("];\n");
    }

    for node in snapshot.nodes() {
        if let Some(left) = node.left {
            out.push_str(&format!("  n{} -> n{left} [label=\"0\"];\n", node.order));
        }
        if let Some(right) = node.right {
            out.push_str(&format!("  n{} -> n{right} [label=\"1\"];\n", node.order));
        }
    }

    out.push_str("}\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
