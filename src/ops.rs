/// Represents an operation with one input. In the textual form these are
/// always written as function calls, e.g. `sin(x)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Ln,
    Sqrt,
    Cos,
    Sin,
    Tg,
    Ctg,
    Arcsin,
    Arccos,
    Arctg,
    Arcctg,
}

/// Represents an operation with two inputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
}

/// Any operator, unary or binary. This is the key of the operator table:
/// display symbol, print precedence and arity are looked up through it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

/// Precedence of leaves. Leaves never need brackets.
pub(crate) const LEAF_PRECEDENCE: u8 = u8::MAX;

impl UnaryOp {
    /// All unary operators, in the order they are declared.
    pub const ALL: [UnaryOp; 10] = [
        UnaryOp::Ln,
        UnaryOp::Sqrt,
        UnaryOp::Cos,
        UnaryOp::Sin,
        UnaryOp::Tg,
        UnaryOp::Ctg,
        UnaryOp::Arcsin,
        UnaryOp::Arccos,
        UnaryOp::Arctg,
        UnaryOp::Arcctg,
    ];

    /// The function name as written in a formula.
    pub fn name(&self) -> &'static str {
        use UnaryOp::*;
        match self {
            Ln => "ln",
            Sqrt => "sqrt",
            Cos => "cos",
            Sin => "sin",
            Tg => "tg",
            Ctg => "ctg",
            Arcsin => "arcsin",
            Arccos => "arccos",
            Arctg => "arctg",
            Arcctg => "arcctg",
        }
    }

    /// Look up a function by its name.
    pub fn from_name(name: &str) -> Option<UnaryOp> {
        UnaryOp::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl BinaryOp {
    /// All binary operators, in the order they are declared.
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Pow,
    ];

    pub fn symbol(&self) -> char {
        use BinaryOp::*;
        match self {
            Add => '+',
            Subtract => '-',
            Multiply => '*',
            Divide => '/',
            Pow => '^',
        }
    }

    pub fn from_symbol(c: char) -> Option<BinaryOp> {
        BinaryOp::ALL.into_iter().find(|op| op.symbol() == c)
    }

    /// Print precedence. Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Add | Subtract => 1,
            Multiply | Divide => 2,
            Pow => 3,
        }
    }

    /// Check if the binary op is commutative.
    pub fn is_commutative(&self) -> bool {
        use BinaryOp::*;
        match self {
            Add => true,
            Subtract => false,
            Multiply => true,
            Divide => false,
            Pow => false,
        }
    }
}

impl Opcode {
    /// The text used for this operator when printing: the function name for
    /// unary ops and the operator character for binary ops.
    pub fn symbol(&self) -> String {
        match self {
            Opcode::Unary(op) => op.name().to_string(),
            Opcode::Binary(op) => op.symbol().to_string(),
        }
    }

    /// Look up an operator from its printed form, e.g. `"+"` or `"arctg"`.
    pub fn from_name(name: &str) -> Option<Opcode> {
        if let Some(op) = UnaryOp::from_name(name) {
            return Some(Opcode::Unary(op));
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => BinaryOp::from_symbol(c).map(Opcode::Binary),
            _ => None,
        }
    }

    /// Print precedence. Functions bind as tightly as `^`.
    pub fn precedence(&self) -> u8 {
        match self {
            Opcode::Unary(_) => BinaryOp::Pow.precedence(),
            Opcode::Binary(op) => op.precedence(),
        }
    }

    /// The number of operands the operator takes.
    pub fn arity(&self) -> usize {
        match self {
            Opcode::Unary(_) => 1,
            Opcode::Binary(_) => 2,
        }
    }
}

impl From<UnaryOp> for Opcode {
    fn from(op: UnaryOp) -> Self {
        Opcode::Unary(op)
    }
}

impl From<BinaryOp> for Opcode {
    fn from(op: BinaryOp) -> Self {
        Opcode::Binary(op)
    }
}
