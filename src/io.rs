use crate::{
    tree::{Equation, Node},
    walk::Traversal,
};

impl Equation {
    /// Short text describing `node` on its own: the number, the variable
    /// name, or the operator symbol.
    pub(crate) fn label(&self, node: &Node) -> String {
        match node {
            Node::Number(val) => val.to_string(),
            Node::Variable(i) => self.variable_name(*i).unwrap_or("?").to_string(),
            Node::Unary(op, _) => op.name().to_string(),
            Node::Binary(op, ..) => op.symbol().to_string(),
        }
    }

    /// Write `node` in infix form. Binary operations are wrapped in
    /// parentheses unless `wrap` is false.
    fn write_infix(
        &self,
        node: &Node,
        f: &mut std::fmt::Formatter<'_>,
        wrap: bool,
    ) -> std::fmt::Result {
        match node {
            Node::Number(_) | Node::Variable(_) => write!(f, "{}", self.label(node)),
            Node::Unary(op, input) => {
                write!(f, "{}(", op.name())?;
                self.write_infix(input, f, false)?;
                write!(f, ")")
            }
            Node::Binary(op, lhs, rhs) => {
                if wrap {
                    write!(f, "(")?;
                }
                self.write_infix(lhs, f, true)?;
                write!(f, " {} ", op.symbol())?;
                self.write_infix(rhs, f, true)?;
                if wrap {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }

    /// Render the tree as an indented outline, one node per line. Each line
    /// shows the pre-order id of the node and its label.
    pub fn tree_string(&self) -> String {
        enum Token {
            Branch,
            Pass,
            Turn,
            Gap,
            Newline,
            Label(usize, String),
        }
        use Token::*;
        // First pass of collecting tokens with no branching.
        let mut tokens: Vec<Token> = Vec::with_capacity(self.len() * 3);
        for visit in self.walk(Traversal::PreOrder) {
            if visit.depth > 0 {
                for _ in 0..(visit.depth - 1) {
                    tokens.push(Gap);
                }
                tokens.push(Turn);
            }
            tokens.push(Label(visit.id, self.label(visit.node)));
            tokens.push(Newline);
        }
        // Insert branching tokens where a later sibling follows.
        let mut line_start: usize = 0;
        for i in 0..tokens.len() {
            match tokens[i] {
                Branch | Pass | Gap | Label(..) => {}
                Newline => line_start = i,
                Turn => {
                    let offset = i - line_start;
                    for li in (0..line_start).rev() {
                        if let Newline = tokens[li] {
                            let ti = li + offset;
                            tokens[ti] = match &tokens[ti] {
                                Branch | Pass | Label(..) | Newline => break,
                                Turn => Branch,
                                Gap => Pass,
                            }
                        }
                    }
                }
            }
        }
        let mut out = String::new();
        for token in tokens.iter() {
            match token {
                Branch => out.push_str(" ├── "),
                Pass => out.push_str(" │   "),
                Turn => out.push_str(" └── "),
                Gap => out.push_str("     "),
                Newline => out.push('\n'),
                Label(id, label) => out.push_str(&format!("[{id}] {label}")),
            }
        }
        return out;
    }
}

/// Fully parenthesized infix form, e.g. `((x + 1) * sin(x ^ 2))`. The output
/// parses back into the same equation. Parsing and simplification only
/// produce finite literals; an infinite or NaN literal put in a tree by hand
/// prints as `inf` or `NaN`, which reads back as a variable.
impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_infix(self.root(), f, true)
    }
}
