use crate::{tree::Equation, walk::Traversal};

/// A node of the tree, flattened for export to graph drawing tools.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Pre-order id. The root is 0.
    pub id: usize,
    pub label: String,
    /// Ids of the children, left before right.
    pub children: Vec<usize>,
    pub leaf: bool,
}

impl Equation {
    /// Flatten the tree into a list of nodes indexed by their pre-order id.
    pub fn graph(&self) -> Vec<GraphNode> {
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(self.len());
        for visit in self.walk(Traversal::PreOrder) {
            if let Some(parent) = visit.parent {
                nodes[parent].children.push(visit.id);
            }
            nodes.push(GraphNode {
                id: visit.id,
                label: self.label(visit.node),
                children: Vec::new(),
                leaf: visit.node.is_leaf(),
            });
        }
        return nodes;
    }

    /// The tree in the DOT language of graphviz. Leaves are drawn as boxes
    /// and operators as ellipses.
    pub fn to_dot(&self) -> String {
        let graph = self.graph();
        let mut out = String::from("digraph equation {\n");
        for node in graph.iter() {
            let shape = if node.leaf { "box" } else { "ellipse" };
            out.push_str(&format!(
                "    n{} [label=\"{}\", shape={}];\n",
                node.id, node.label, shape
            ));
        }
        for node in graph.iter() {
            for child in node.children.iter() {
                out.push_str(&format!("    n{} -> n{};\n", node.id, child));
            }
        }
        out.push_str("}\n");
        return out;
    }
}
