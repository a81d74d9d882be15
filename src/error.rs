use crate::ops::{BinaryOp, Opcode, UnaryOp};
use std::fmt::{Debug, Display};

/// Errors produced while reading the textual form of an equation. Every
/// variant carries the byte offset into the input where the problem was
/// detected.
#[derive(Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The input contains nothing but whitespace.
    EmptyInput,
    /// A character that doesn't start any token.
    UnexpectedCharacter(char, usize),
    /// A digit sequence that is not a valid number, e.g. `1.`.
    InvalidNumber(usize),
    /// An operator or the end of input was found where an operand was expected.
    MissingOperand(usize),
    /// An opening parenthesis was never closed.
    UnclosedParenthesis(usize),
    /// A closing parenthesis without a matching opening one.
    UnmatchedClosingParenthesis(usize),
    /// A complete expression was read but more input follows.
    TrailingInput(usize),
    /// A function name used as a variable, i.e. not followed by `(`.
    ReservedName(String, usize),
    /// An identifier followed by `(` that is not a known function.
    UnknownFunction(String, usize),
    /// Parentheses and function calls are nested deeper than allowed.
    NestingTooDeep(usize),
}

/// Structural errors of equations and their variable tables.
#[derive(Clone, PartialEq, Eq)]
pub enum EquationError {
    /// The children given for an operator don't match its arity.
    MalformedNode(Opcode),
    /// The operation supports at most one variable.
    TooManyVariables(usize),
    /// No variable with this name exists in the equation.
    UnknownVariable(String),
    /// A variable of the equation was not given a value.
    UnboundVariable(String),
    /// The same name appears twice in a variable table.
    DuplicateVariable(String),
    /// A variable node refers to an index outside the variable table. The
    /// first value is the index, the second the size of the table.
    VariableIndexOutOfRange(usize, usize),
    /// A name in a variable table that the parser would not read back as a
    /// variable: empty, not an identifier, or the name of a function.
    InvalidVariableName(String),
}

/// Numeric errors raised when evaluating or folding constants.
#[derive(Clone, PartialEq)]
pub enum DomainError {
    DivisionByZero,
    NonPositiveLogarithm(f64),
    NegativeSquareRoot(f64),
    /// Argument of `arcsin` or `arccos` outside [-1, 1].
    InverseTrigOutOfRange(UnaryOp, f64),
    /// Cotangent of an angle whose tangent is zero.
    CotangentUndefined(f64),
    /// The result of the operator is too large to represent.
    Overflow(BinaryOp),
    /// The operator has no real result for its operands, e.g. `(-8)^0.5`.
    NotANumber(BinaryOp),
}

/// Any error this crate can produce. Operations that chain several passes,
/// like Taylor expansion, return this.
#[derive(Clone, PartialEq)]
pub enum Error {
    Syntax(SyntaxError),
    Equation(EquationError),
    Domain(DomainError),
}

impl SyntaxError {
    /// Byte offset into the input where the error was detected.
    pub fn position(&self) -> usize {
        use SyntaxError::*;
        match self {
            EmptyInput => 0,
            UnexpectedCharacter(_, pos)
            | InvalidNumber(pos)
            | MissingOperand(pos)
            | UnclosedParenthesis(pos)
            | UnmatchedClosingParenthesis(pos)
            | TrailingInput(pos)
            | ReservedName(_, pos)
            | UnknownFunction(_, pos)
            | NestingTooDeep(pos) => *pos,
        }
    }
}

impl Debug for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SyntaxError::*;
        match self {
            EmptyInput => write!(f, "EmptyInput"),
            UnexpectedCharacter(c, pos) => f
                .debug_tuple("UnexpectedCharacter")
                .field(c)
                .field(pos)
                .finish(),
            InvalidNumber(pos) => f.debug_tuple("InvalidNumber").field(pos).finish(),
            MissingOperand(pos) => f.debug_tuple("MissingOperand").field(pos).finish(),
            UnclosedParenthesis(pos) => f.debug_tuple("UnclosedParenthesis").field(pos).finish(),
            UnmatchedClosingParenthesis(pos) => f
                .debug_tuple("UnmatchedClosingParenthesis")
                .field(pos)
                .finish(),
            TrailingInput(pos) => f.debug_tuple("TrailingInput").field(pos).finish(),
            ReservedName(name, pos) => f
                .debug_tuple("ReservedName")
                .field(name)
                .field(pos)
                .finish(),
            UnknownFunction(name, pos) => f
                .debug_tuple("UnknownFunction")
                .field(name)
                .field(pos)
                .finish(),
            NestingTooDeep(pos) => f.debug_tuple("NestingTooDeep").field(pos).finish(),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SyntaxError::*;
        match self {
            EmptyInput => write!(f, "the formula is empty"),
            UnexpectedCharacter(c, pos) => write!(f, "unexpected character '{c}' at {pos}"),
            InvalidNumber(pos) => write!(f, "malformed number at {pos}"),
            MissingOperand(pos) => write!(f, "expected an operand at {pos}"),
            UnclosedParenthesis(pos) => write!(f, "parenthesis opened at {pos} is never closed"),
            UnmatchedClosingParenthesis(pos) => {
                write!(f, "closing parenthesis at {pos} has no opening match")
            }
            TrailingInput(pos) => write!(f, "unexpected input after the formula at {pos}"),
            ReservedName(name, pos) => {
                write!(f, "'{name}' at {pos} is a function and cannot be a variable")
            }
            UnknownFunction(name, pos) => write!(f, "unknown function '{name}' at {pos}"),
            NestingTooDeep(pos) => write!(f, "formula is nested too deeply at {pos}"),
        }
    }
}

impl Debug for EquationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use EquationError::*;
        match self {
            MalformedNode(op) => f.debug_tuple("MalformedNode").field(op).finish(),
            TooManyVariables(n) => f.debug_tuple("TooManyVariables").field(n).finish(),
            UnknownVariable(name) => f.debug_tuple("UnknownVariable").field(name).finish(),
            UnboundVariable(name) => f.debug_tuple("UnboundVariable").field(name).finish(),
            DuplicateVariable(name) => f.debug_tuple("DuplicateVariable").field(name).finish(),
            VariableIndexOutOfRange(index, len) => f
                .debug_tuple("VariableIndexOutOfRange")
                .field(index)
                .field(len)
                .finish(),
            InvalidVariableName(name) => {
                f.debug_tuple("InvalidVariableName").field(name).finish()
            }
        }
    }
}

impl Display for EquationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use EquationError::*;
        match self {
            MalformedNode(op) => write!(
                f,
                "operator '{}' expects {} operand(s)",
                op.symbol(),
                op.arity()
            ),
            TooManyVariables(n) => {
                write!(f, "expected at most one variable, the equation has {n}")
            }
            UnknownVariable(name) => write!(f, "unknown variable '{name}'"),
            UnboundVariable(name) => write!(f, "variable '{name}' has no value"),
            DuplicateVariable(name) => write!(f, "variable '{name}' is declared twice"),
            VariableIndexOutOfRange(index, len) => write!(
                f,
                "variable index {index} is out of range for a table of {len} variable(s)"
            ),
            InvalidVariableName(name) => write!(f, "'{name}' is not a valid variable name"),
        }
    }
}

impl Debug for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use DomainError::*;
        match self {
            DivisionByZero => write!(f, "DivisionByZero"),
            NonPositiveLogarithm(x) => f.debug_tuple("NonPositiveLogarithm").field(x).finish(),
            NegativeSquareRoot(x) => f.debug_tuple("NegativeSquareRoot").field(x).finish(),
            InverseTrigOutOfRange(op, x) => f
                .debug_tuple("InverseTrigOutOfRange")
                .field(op)
                .field(x)
                .finish(),
            CotangentUndefined(x) => f.debug_tuple("CotangentUndefined").field(x).finish(),
            Overflow(op) => f.debug_tuple("Overflow").field(op).finish(),
            NotANumber(op) => f.debug_tuple("NotANumber").field(op).finish(),
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use DomainError::*;
        match self {
            DivisionByZero => write!(f, "division by zero"),
            NonPositiveLogarithm(x) => write!(f, "logarithm of non-positive number {x}"),
            NegativeSquareRoot(x) => write!(f, "square root of negative number {x}"),
            InverseTrigOutOfRange(op, x) => {
                write!(f, "{}({x}) is undefined outside [-1, 1]", op.name())
            }
            CotangentUndefined(x) => write!(f, "cotangent is undefined at {x}"),
            Overflow(op) => write!(f, "'{}' overflowed", op.symbol()),
            NotANumber(op) => write!(f, "'{}' has no real result", op.symbol()),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e) => f.debug_tuple("Syntax").field(e).finish(),
            Error::Equation(e) => f.debug_tuple("Equation").field(e).finish(),
            Error::Domain(e) => f.debug_tuple("Domain").field(e).finish(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e) => write!(f, "syntax error: {e}"),
            Error::Equation(e) => write!(f, "equation error: {e}"),
            Error::Domain(e) => write!(f, "math domain error: {e}"),
        }
    }
}

impl std::error::Error for SyntaxError {}
impl std::error::Error for EquationError {}
impl std::error::Error for DomainError {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(e) => Some(e),
            Error::Equation(e) => Some(e),
            Error::Domain(e) => Some(e),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(value: SyntaxError) -> Self {
        Error::Syntax(value)
    }
}

impl From<EquationError> for Error {
    fn from(value: EquationError) -> Self {
        Error::Equation(value)
    }
}

impl From<DomainError> for Error {
    fn from(value: DomainError) -> Self {
        Error::Domain(value)
    }
}
