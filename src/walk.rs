use crate::tree::{Equation, Node};

/// Order in which a depth first traversal visits the nodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Traversal {
    /// Parents before their children.
    PreOrder,
    /// Left subtree, then the node, then the right subtree. Unary operators
    /// only have a right child, so they come before their operand.
    InOrder,
    /// Children before their parents.
    PostOrder,
}

/// A node visited during a traversal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visit<'a> {
    /// Pre-order index of the node, irrespective of the traversal order. The
    /// root is 0.
    pub id: usize,
    /// Id of the parent node.
    pub parent: Option<usize>,
    /// Distance from the root.
    pub depth: usize,
    pub node: &'a Node,
}

enum Task<'a> {
    /// Visit this subtree.
    Expand {
        node: &'a Node,
        parent: Option<usize>,
        depth: usize,
    },
    /// Yield a node whose id is already assigned.
    Emit(Visit<'a>),
}

/// Iterator that walks a tree depth first, without recursion.
pub struct DepthWalker<'a> {
    stack: Vec<Task<'a>>,
    order: Traversal,
    next_id: usize,
    last_pushed: usize,
}

impl<'a> DepthWalker<'a> {
    pub fn new(root: &'a Node, order: Traversal) -> DepthWalker<'a> {
        DepthWalker {
            stack: vec![Task::Expand {
                node: root,
                parent: None,
                depth: 0,
            }],
            order,
            next_id: 0,
            last_pushed: 0,
        }
    }

    /// Skip the children of the node that was just visited. Only meaningful in
    /// pre-order, where the children haven't been visited yet. Skipped nodes
    /// don't consume ids.
    pub fn skip_children(&mut self) {
        if let Traversal::PreOrder = self.order {
            for _ in 0..self.last_pushed {
                self.stack.pop();
            }
        }
        self.last_pushed = 0;
    }

    fn push_child(&mut self, child: Option<&'a Node>, parent: usize, depth: usize) {
        if let Some(node) = child {
            self.stack.push(Task::Expand {
                node,
                parent: Some(parent),
                depth: depth + 1,
            });
            self.last_pushed += 1;
        }
    }
}

impl<'a> Iterator for DepthWalker<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, parent, depth) = match self.stack.pop()? {
                Task::Emit(visit) => return Some(visit),
                Task::Expand {
                    node,
                    parent,
                    depth,
                } => (node, parent, depth),
            };
            let visit = Visit {
                id: self.next_id,
                parent,
                depth,
                node,
            };
            self.next_id += 1;
            self.last_pushed = 0;
            // Last in first out, so the right child is pushed first.
            match self.order {
                Traversal::PreOrder => {
                    self.push_child(node.right(), visit.id, depth);
                    self.push_child(node.left(), visit.id, depth);
                    return Some(visit);
                }
                Traversal::InOrder => {
                    self.push_child(node.right(), visit.id, depth);
                    self.stack.push(Task::Emit(visit));
                    self.push_child(node.left(), visit.id, depth);
                }
                Traversal::PostOrder => {
                    self.stack.push(Task::Emit(visit));
                    self.push_child(node.right(), visit.id, depth);
                    self.push_child(node.left(), visit.id, depth);
                }
            }
        }
    }
}

impl Node {
    pub fn walk(&self, order: Traversal) -> DepthWalker<'_> {
        DepthWalker::new(self, order)
    }
}

impl Equation {
    /// Walk the nodes of the equation depth first, in the given `order`.
    pub fn walk(&self, order: Traversal) -> DepthWalker<'_> {
        DepthWalker::new(self.root(), order)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse;

    fn ids(eq: &crate::Equation, order: Traversal) -> Vec<usize> {
        eq.walk(order).map(|v| v.id).collect()
    }

    #[test]
    fn t_traversal_orders() {
        // Pre-order ids: + 0, * 1, x 2, 2 3, sin 4, y 5.
        let eq = parse("x*2 + sin(y)").unwrap();
        assert_eq!(ids(&eq, Traversal::PreOrder), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ids(&eq, Traversal::InOrder), vec![2, 1, 3, 0, 4, 5]);
        assert_eq!(ids(&eq, Traversal::PostOrder), vec![2, 3, 1, 5, 4, 0]);
    }

    #[test]
    fn t_parents_and_depths() {
        let eq = parse("ln(x) - 1").unwrap();
        let visits: Vec<_> = eq
            .walk(Traversal::PreOrder)
            .map(|v| (v.id, v.parent, v.depth))
            .collect();
        assert_eq!(
            visits,
            vec![(0, None, 0), (1, Some(0), 1), (2, Some(1), 2), (3, Some(0), 1)]
        );
        let last = eq.walk(Traversal::PostOrder).last().unwrap();
        assert_eq!(last.node, eq.root());
    }

    #[test]
    fn t_same_result_twice() {
        let eq = parse("(x + y)^2 / cos(x*y)").unwrap();
        for order in [Traversal::PreOrder, Traversal::InOrder, Traversal::PostOrder] {
            let a: Vec<_> = eq.walk(order).collect();
            let b: Vec<_> = eq.walk(order).collect();
            assert_eq!(a, b);
            assert_eq!(a.len(), eq.len());
        }
    }

    #[test]
    fn t_skip_children() {
        let eq = parse("sin(x + 1) * y").unwrap();
        let mut walker = eq.walk(Traversal::PreOrder);
        let mut visited = Vec::new();
        while let Some(visit) = walker.next() {
            visited.push(visit.node.opcode().map(|op| op.symbol()));
            if let Some(crate::Opcode::Unary(_)) = visit.node.opcode() {
                walker.skip_children();
            }
        }
        assert_eq!(
            visited,
            vec![Some("*".to_string()), Some("sin".to_string()), None]
        );
    }

    #[test]
    fn t_deep_tree() {
        // The walker doesn't recurse, so very deep trees are fine.
        let mut node = crate::tree::var(0);
        for _ in 0..100_000 {
            node = crate::tree::sin(node);
        }
        assert_eq!(node.walk(Traversal::PostOrder).count(), 100_001);
        // Drop iteratively to keep the test from overflowing the stack.
        while let Node::Unary(_, input) = node {
            node = *input;
        }
    }
}
