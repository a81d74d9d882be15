use crate::{
    error::EquationError,
    ops::{
        BinaryOp::{self, *},
        Opcode,
        UnaryOp::{self, *},
    },
    parser::is_variable_name,
};

/// Represents a node in an expression tree. Operators own their operands, so
/// every tree is exclusively owned by its root and cloning is always a deep
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    /// Index into the variable table of the owning `Equation`.
    Variable(usize),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
}

use Node::*;

impl Node {
    /// Build an operator node from its opcode and optional children, the way
    /// external tools describe nodes. Unary operators take their operand from
    /// `right` and require `left` to be `None`. Any other child pattern is
    /// rejected.
    pub fn operator(
        op: Opcode,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Result<Node, EquationError> {
        match (op, left, right) {
            (Opcode::Unary(op), None, Some(input)) => Ok(Unary(op, Box::new(input))),
            (Opcode::Binary(op), Some(lhs), Some(rhs)) => {
                Ok(Binary(op, Box::new(lhs), Box::new(rhs)))
            }
            (op, _, _) => Err(EquationError::MalformedNode(op)),
        }
    }

    /// The operator of this node, if it is not a leaf.
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Number(_) | Variable(_) => None,
            Unary(op, _) => Some(Opcode::Unary(*op)),
            Binary(op, _, _) => Some(Opcode::Binary(*op)),
        }
    }

    /// Left child. Only binary operators have one.
    pub fn left(&self) -> Option<&Node> {
        match self {
            Binary(_, lhs, _) => Some(lhs),
            Number(_) | Variable(_) | Unary(..) => None,
        }
    }

    /// Right child. This is the operand of unary operators.
    pub fn right(&self) -> Option<&Node> {
        match self {
            Unary(_, input) => Some(input),
            Binary(_, _, rhs) => Some(rhs),
            Number(_) | Variable(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Number(_) | Variable(_))
    }

    /// The literal value, if this is a number node.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Number(val) => Some(*val),
            Variable(_) | Unary(..) | Binary(..) => None,
        }
    }

    /// Check if this node is exactly the literal `val`.
    pub fn is_number(&self, val: f64) -> bool {
        matches!(self, Number(v) if *v == val)
    }

    /// Check if the variable `var` occurs anywhere in this subtree.
    pub fn depends_on(&self, var: usize) -> bool {
        match self {
            Number(_) => false,
            Variable(i) => *i == var,
            Unary(_, input) => input.depends_on(var),
            Binary(_, lhs, rhs) => lhs.depends_on(var) || rhs.depends_on(var),
        }
    }

    /// The number of nodes in this subtree.
    pub fn len(&self) -> usize {
        match self {
            Number(_) | Variable(_) => 1,
            Unary(_, input) => 1 + input.len(),
            Binary(_, lhs, rhs) => 1 + lhs.len() + rhs.len(),
        }
    }

    /// Number of nodes on the longest path from this node to a leaf,
    /// including both ends.
    pub fn depth(&self) -> usize {
        match self {
            Number(_) | Variable(_) => 1,
            Unary(_, input) => 1 + input.depth(),
            Binary(_, lhs, rhs) => 1 + usize::max(lhs.depth(), rhs.depth()),
        }
    }

    /// The largest variable index used in this subtree.
    pub fn max_variable(&self) -> Option<usize> {
        match self {
            Number(_) => None,
            Variable(i) => Some(*i),
            Unary(_, input) => input.max_variable(),
            Binary(_, lhs, rhs) => match (lhs.max_variable(), rhs.max_variable()) {
                (Some(a), Some(b)) => Some(usize::max(a, b)),
                (a, None) => a,
                (None, b) => b,
            },
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Number(0.)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

pub fn num(value: f64) -> Node {
    Number(value)
}

pub fn var(index: usize) -> Node {
    Variable(index)
}

macro_rules! unary_func {
    ($name:ident, $op:ident) => {
        pub fn $name(input: Node) -> Node {
            Unary($op, Box::new(input))
        }
    };
}

unary_func!(ln, Ln);
unary_func!(sqrt, Sqrt);
unary_func!(cos, Cos);
unary_func!(sin, Sin);
unary_func!(tg, Tg);
unary_func!(ctg, Ctg);
unary_func!(arcsin, Arcsin);
unary_func!(arccos, Arccos);
unary_func!(arctg, Arctg);
unary_func!(arcctg, Arcctg);

macro_rules! binary_func {
    ($name:ident, $op:ident) => {
        pub fn $name(lhs: Node, rhs: Node) -> Node {
            Binary($op, Box::new(lhs), Box::new(rhs))
        }
    };
}

binary_func!(add, Add);
binary_func!(sub, Subtract);
binary_func!(mul, Multiply);
binary_func!(div, Divide);
binary_func!(pow, Pow);

/// An expression tree together with the names of its variables. Variables in
/// the tree are referred to by their index in `variables`. The names are
/// unique and stored in the order they first appeared in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    root: Node,
    variables: Vec<String>,
}

impl Equation {
    /// Create an equation from a tree and a variable table. The names must be
    /// unique identifiers that are not function names, and every variable
    /// index in the tree must refer to an entry of the table.
    pub fn new(root: Node, variables: Vec<String>) -> Result<Equation, EquationError> {
        for (i, name) in variables.iter().enumerate() {
            if !is_variable_name(name) {
                return Err(EquationError::InvalidVariableName(name.clone()));
            }
            if variables[..i].contains(name) {
                return Err(EquationError::DuplicateVariable(name.clone()));
            }
        }
        if let Some(index) = root.max_variable() {
            if index >= variables.len() {
                return Err(EquationError::VariableIndexOutOfRange(
                    index,
                    variables.len(),
                ));
            }
        }
        return Ok(Equation { root, variables });
    }

    /// Callers guarantee the variable table is valid for `root`.
    pub(crate) fn from_parts(root: Node, variables: Vec<String>) -> Equation {
        Equation { root, variables }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Names of the variables, indexed by variable index.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_name(&self, index: usize) -> Option<&str> {
        self.variables.get(index).map(|s| s.as_str())
    }

    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == name)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// The tree and the variable table. This drops the equation and gives the
    /// ownership of the data to the caller.
    pub fn take(self) -> (Node, Vec<String>) {
        (self.root, self.variables)
    }

    /// Turn named values into the positional slice expected by
    /// `evaluate`. Every variable must be given exactly one value.
    pub fn bind(&self, values: &[(&str, f64)]) -> Result<Vec<f64>, EquationError> {
        let mut bound: Vec<Option<f64>> = vec![None; self.variables.len()];
        for (name, value) in values {
            match self.variable_index(name) {
                Some(i) => bound[i] = Some(*value),
                None => return Err(EquationError::UnknownVariable(name.to_string())),
            }
        }
        bound
            .iter()
            .zip(self.variables.iter())
            .map(|(val, name)| val.ok_or_else(|| EquationError::UnboundVariable(name.clone())))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_operator_arity() {
        assert_eq!(
            Node::operator(Opcode::Unary(Sin), None, Some(var(0))).unwrap(),
            sin(var(0))
        );
        assert_eq!(
            Node::operator(Opcode::Binary(Add), Some(num(1.)), Some(var(0))).unwrap(),
            add(num(1.), var(0))
        );
        assert_eq!(
            Node::operator(Opcode::Unary(Ln), Some(var(0)), Some(var(0))),
            Err(EquationError::MalformedNode(Opcode::Unary(Ln)))
        );
        assert_eq!(
            Node::operator(Opcode::Unary(Ln), Some(var(0)), None),
            Err(EquationError::MalformedNode(Opcode::Unary(Ln)))
        );
        assert_eq!(
            Node::operator(Opcode::Binary(Pow), None, Some(var(0))),
            Err(EquationError::MalformedNode(Opcode::Binary(Pow)))
        );
    }

    #[test]
    fn t_children() {
        let tree = div(sin(var(0)), num(2.));
        assert_eq!(tree.opcode(), Some(Opcode::Binary(Divide)));
        assert_eq!(tree.left(), Some(&sin(var(0))));
        assert_eq!(tree.right(), Some(&num(2.)));
        let inner = tree.left().unwrap();
        assert_eq!(inner.left(), None);
        assert_eq!(inner.right(), Some(&var(0)));
        assert!(inner.right().unwrap().is_leaf());
    }

    #[test]
    fn t_size_and_depth() {
        let tree = add(mul(num(2.), var(0)), cos(var(1)));
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.max_variable(), Some(1));
        assert!(tree.depends_on(0));
        assert!(tree.depends_on(1));
        assert!(!tree.depends_on(2));
        assert_eq!(num(3.).max_variable(), None);
    }

    #[test]
    fn t_equation_validation() {
        let tree = add(var(0), var(1));
        assert!(Equation::new(tree.clone(), vec!["x".into(), "y".into()]).is_ok());
        assert_eq!(
            Equation::new(tree.clone(), vec!["x".into()]),
            Err(EquationError::VariableIndexOutOfRange(1, 1))
        );
        assert_eq!(
            Equation::new(tree, vec!["x".into(), "x".into()]),
            Err(EquationError::DuplicateVariable("x".into()))
        );
    }

    #[test]
    fn t_variable_names() {
        for name in ["sin", "arcctg", "2x", "", "x y", "a-b", "é"] {
            assert_eq!(
                Equation::new(var(0), vec![name.into()]),
                Err(EquationError::InvalidVariableName(name.into()))
            );
        }
        for name in ["x", "_", "Sin", "sin2", "x_1", "ln_x"] {
            let eq = Equation::new(mul(var(0), num(2.)), vec![name.into()]).unwrap();
            assert_eq!(crate::parse(&eq.to_string()).unwrap(), eq);
        }
    }

    #[test]
    fn t_deep_copy() {
        let eq = Equation::new(mul(var(0), num(2.)), vec!["x".into()]).unwrap();
        let mut copy = eq.clone();
        *copy.root_mut() = num(1.);
        assert_eq!(eq.root(), &mul(var(0), num(2.)));
        assert_eq!(copy.variables(), eq.variables());
    }

    #[test]
    fn t_bind() {
        let eq = Equation::new(add(var(0), var(1)), vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(eq.bind(&[("y", 2.), ("x", 1.)]).unwrap(), vec![1., 2.]);
        assert_eq!(
            eq.bind(&[("x", 1.)]),
            Err(EquationError::UnboundVariable("y".into()))
        );
        assert_eq!(
            eq.bind(&[("x", 1.), ("z", 1.)]),
            Err(EquationError::UnknownVariable("z".into()))
        );
    }

    #[test]
    fn t_variable_lookup() {
        let eq = Equation::new(var(1), vec!["alpha".into(), "beta_2".into()]).unwrap();
        assert_eq!(eq.variable_index("beta_2"), Some(1));
        assert_eq!(eq.variable_index("gamma"), None);
        assert_eq!(eq.variable_name(0), Some("alpha"));
        assert_eq!(eq.variable_name(2), None);
        assert_eq!(eq.num_variables(), 2);
    }
}
