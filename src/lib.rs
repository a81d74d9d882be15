pub mod error;
pub mod eval;
pub mod ops;
pub mod parser;
pub mod simplify;
pub mod tree;
pub mod walk;

mod derivative;
mod dot;
mod io;
mod latex;
mod macros;
mod taylor;

#[cfg(test)]
mod test;

pub use dot::GraphNode;
pub use error::{DomainError, EquationError, Error, SyntaxError};
pub use ops::{BinaryOp, Opcode, UnaryOp};
pub use parser::{ParserConfig, parse, parse_with};
pub use simplify::SimplifyConfig;
pub use tree::{
    Equation, Node, add, arccos, arcctg, arcsin, arctg, cos, ctg, div, ln, mul, num, pow, sin,
    sqrt, sub, tg, var,
};
pub use walk::{DepthWalker, Traversal, Visit};
