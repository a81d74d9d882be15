use crate::{
    error::EquationError,
    ops::{
        BinaryOp::{self, *},
        UnaryOp::{self, *},
    },
    tree::{Equation, Node, add, cos, div, ln, mul, num, pow, sin, sqrt, sub},
};

impl UnaryOp {
    /// Chain rule: derivative of this function applied to `input`, given the
    /// derivative `dinput` of the input.
    fn derivative(&self, input: &Node, dinput: Node) -> Node {
        let r = || input.clone();
        match self {
            Ln => div(dinput, r()),
            Sqrt => div(dinput, mul(num(2.), sqrt(r()))),
            Sin => mul(cos(r()), dinput),
            Cos => mul(mul(num(-1.), sin(r())), dinput),
            Tg => div(dinput, pow(cos(r()), num(2.))),
            Ctg => div(mul(num(-1.), dinput), pow(sin(r()), num(2.))),
            Arcsin => div(dinput, sqrt(sub(num(1.), pow(r(), num(2.))))),
            Arccos => div(
                mul(num(-1.), dinput),
                sqrt(sub(num(1.), pow(r(), num(2.)))),
            ),
            Arctg => div(dinput, add(num(1.), pow(r(), num(2.)))),
            // The derivative of arcctg is the negation of that of arctg.
            Arcctg => div(mul(num(-1.), dinput), add(num(1.), pow(r(), num(2.)))),
        }
    }
}

impl BinaryOp {
    fn derivative(&self, lhs: &Node, rhs: &Node, var: usize) -> Node {
        let (l, r) = (|| lhs.clone(), || rhs.clone());
        match self {
            Add => add(lhs.derivative(var), rhs.derivative(var)),
            Subtract => sub(lhs.derivative(var), rhs.derivative(var)),
            Multiply => add(
                mul(lhs.derivative(var), r()),
                mul(l(), rhs.derivative(var)),
            ),
            Divide => div(
                sub(
                    mul(lhs.derivative(var), r()),
                    mul(l(), rhs.derivative(var)),
                ),
                pow(r(), num(2.)),
            ),
            Pow => match (lhs.depends_on(var), rhs.depends_on(var)) {
                // Power rule.
                (_, false) => mul(
                    mul(r(), pow(l(), sub(r(), num(1.)))),
                    lhs.derivative(var),
                ),
                // Exponential rule.
                (false, true) => mul(mul(pow(l(), r()), ln(l())), rhs.derivative(var)),
                // l^r = e^(r ln(l)), so d(l^r) = l^r (d(r) ln(l) + r d(l) / l).
                (true, true) => mul(
                    pow(l(), r()),
                    add(
                        mul(rhs.derivative(var), ln(l())),
                        div(mul(r(), lhs.derivative(var)), l()),
                    ),
                ),
            },
        }
    }
}

impl Node {
    /// Symbolic derivative of this subtree with respect to the variable with
    /// index `var`. The result is a new tree and is not simplified. A
    /// variable index that doesn't occur in the tree is allowed, and the
    /// derivative is then zero.
    pub fn derivative(&self, var: usize) -> Node {
        match self {
            Node::Number(_) => num(0.),
            Node::Variable(i) => num(if *i == var { 1. } else { 0. }),
            Node::Unary(op, input) => op.derivative(input, input.derivative(var)),
            Node::Binary(op, lhs, rhs) => op.derivative(lhs, rhs, var),
        }
    }
}

impl Equation {
    /// Differentiate with respect to the variable with index `var`. The
    /// result shares the variable table of this equation. See
    /// `Node::derivative`.
    pub fn differentiate(&self, var: usize) -> Equation {
        Equation::from_parts(self.root().derivative(var), self.variables().to_vec())
    }

    /// Differentiate with respect to the variable called `name`.
    pub fn differentiate_by_name(&self, name: &str) -> Result<Equation, EquationError> {
        match self.variable_index(name) {
            Some(var) => Ok(self.differentiate(var)),
            None => Err(EquationError::UnknownVariable(name.to_string())),
        }
    }
}
