use crate::{
    error::DomainError,
    ops::BinaryOp::{self, *},
    tree::{Equation, Node, mul, num, pow},
};
use log::{debug, trace, warn};

/// Options for `Equation::simplify_fully`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimplifyConfig {
    /// Upper bound on the number of simplification passes.
    pub max_passes: usize,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        SimplifyConfig { max_passes: 64 }
    }
}

/// An in-place rewrite of a single node.
#[derive(Debug, PartialEq)]
enum Rewrite {
    /// Replace the node with its left child, dropping the right child.
    LiftLeft,
    /// Replace the node with its right child, dropping the left child.
    LiftRight,
    /// Replace the node and all its children with a number.
    Collapse(f64),
    /// `0 - x` becomes `(-1) * x`.
    NegateRight,
    /// Replace the node with a freshly built subtree.
    Replace(Node),
}

impl BinaryOp {
    /// Identity rewrites of this operator. Only called when at least one of
    /// `lhs` and `rhs` is not a number. Literal operands must match exactly.
    fn identity(&self, lhs: &Node, rhs: &Node) -> Result<Option<Rewrite>, DomainError> {
        use Node::Variable;
        use Rewrite::*;
        Ok(match (self, lhs, rhs) {
            (Add, _, r) if r.is_number(0.) => Some(LiftLeft),
            (Add, l, _) if l.is_number(0.) => Some(LiftRight),
            (Add, Variable(a), Variable(b)) if a == b => {
                Some(Replace(mul(num(2.), Variable(*a))))
            }
            (Subtract, _, r) if r.is_number(0.) => Some(LiftLeft),
            (Subtract, l, _) if l.is_number(0.) => Some(NegateRight),
            (Subtract, Variable(a), Variable(b)) if a == b => Some(Collapse(0.)),
            (Multiply, l, r) if l.is_number(0.) || r.is_number(0.) => Some(Collapse(0.)),
            (Multiply, _, r) if r.is_number(1.) => Some(LiftLeft),
            (Multiply, l, _) if l.is_number(1.) => Some(LiftRight),
            (Multiply, Variable(a), Variable(b)) if a == b => {
                Some(Replace(pow(Variable(*a), num(2.))))
            }
            (Divide, l, _) if l.is_number(0.) => Some(Collapse(0.)),
            (Divide, _, r) if r.is_number(0.) => return Err(DomainError::DivisionByZero),
            (Divide, _, r) if r.is_number(1.) => Some(LiftLeft),
            (Divide, Variable(a), Variable(b)) if a == b => Some(Collapse(1.)),
            (Pow, _, r) if r.is_number(1.) => Some(LiftLeft),
            (Pow, l, _) if l.is_number(1.) => Some(Collapse(1.)),
            (Pow, l, _) if l.is_number(0.) => Some(Collapse(0.)),
            _ => None,
        })
    }
}

impl Node {
    /// Replace this node with its left child. The right child is dropped.
    fn lift_left(&mut self) {
        if let Node::Binary(_, lhs, _) = self {
            let lhs = std::mem::take(lhs.as_mut());
            *self = lhs;
        }
    }

    /// Replace this node with its right child, which is the operand of a unary
    /// node. The left child, if any, is dropped.
    fn lift_right(&mut self) {
        if let Node::Binary(_, _, input) | Node::Unary(_, input) = self {
            let input = std::mem::take(input.as_mut());
            *self = input;
        }
    }

    /// Turn this node into a number leaf, dropping all its children.
    fn collapse(&mut self, value: f64) {
        *self = Node::Number(value);
    }

    fn rewrite(&mut self, rewrite: Rewrite) {
        trace!("Simplify: applying {:?}", rewrite);
        match rewrite {
            Rewrite::LiftLeft => self.lift_left(),
            Rewrite::LiftRight => self.lift_right(),
            Rewrite::Collapse(value) => self.collapse(value),
            Rewrite::NegateRight => {
                if let Node::Binary(_, _, rhs) = self {
                    let rhs = std::mem::take(rhs.as_mut());
                    *self = mul(num(-1.), rhs);
                }
            }
            Rewrite::Replace(node) => *self = node,
        }
    }

    /// If all the operands of this node are numbers, compute its value.
    fn folded(&self) -> Result<Option<f64>, DomainError> {
        Ok(match self {
            Node::Number(_) | Node::Variable(_) => None,
            Node::Unary(op, input) => match input.as_number() {
                Some(value) => Some(op.apply(value)?),
                None => None,
            },
            Node::Binary(op, lhs, rhs) => match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => Some(op.apply(a, b)?),
                _ => None,
            },
        })
    }

    /// Simplify this subtree in place with one post-order pass. Children are
    /// simplified before their parent. A node whose operands are all numbers
    /// is folded into a number; otherwise the identity rewrites of its
    /// operator are tried. Returns true if the tree was modified.
    ///
    /// A domain error found while folding, such as a division by zero, aborts
    /// the pass. The tree is left partially simplified in that case.
    pub fn simplify(&mut self) -> Result<bool, DomainError> {
        let mut modified = match self {
            Node::Number(_) | Node::Variable(_) => return Ok(false),
            Node::Unary(_, input) => input.simplify()?,
            Node::Binary(_, lhs, rhs) => {
                let left = lhs.simplify()?;
                rhs.simplify()? || left
            }
        };
        if let Some(value) = self.folded()? {
            self.collapse(value);
            return Ok(true);
        }
        // Functions of a non-constant input have no identity rewrites.
        let rewrite = match self {
            Node::Number(_) | Node::Variable(_) | Node::Unary(..) => None,
            Node::Binary(op, lhs, rhs) => op.identity(lhs, rhs)?,
        };
        if let Some(rewrite) = rewrite {
            self.rewrite(rewrite);
            modified = true;
        }
        return Ok(modified);
    }
}

impl Equation {
    /// Simplify the equation with a single pass. See `Node::simplify`.
    pub fn simplify(&mut self) -> Result<bool, DomainError> {
        self.root_mut().simplify()
    }

    /// Run simplification passes until a pass makes no change, or until
    /// `config.max_passes` passes have modified the tree. Returns the number
    /// of passes that modified the tree.
    ///
    /// With the current rewrites a single pass already reaches a fixed point,
    /// because every rewrite leaves a node that no other rewrite applies to
    /// and parents are visited after their children. This returns at most 1
    /// for now; the second pass only confirms that nothing changed.
    pub fn simplify_fully(&mut self, config: &SimplifyConfig) -> Result<usize, DomainError> {
        let mut passes = 0;
        while passes < config.max_passes {
            if !self.simplify()? {
                debug!("Simplify: reached a fixed point after {passes} pass(es)");
                return Ok(passes);
            }
            passes += 1;
        }
        warn!(
            "Simplify: stopped after {} passes without reaching a fixed point",
            config.max_passes
        );
        return Ok(passes);
    }
}
