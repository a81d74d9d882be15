use crate::{
    error::SyntaxError,
    ops::{BinaryOp, UnaryOp},
    tree::{Equation, Node},
};
use log::trace;

/// Options for `parse_with`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of parentheses and function calls.
    pub max_nesting: usize,
    /// Maximum depth of the parsed tree. A flat chain like `x + x + x` builds
    /// a left spine as deep as the chain is long, so this is kept well above
    /// `max_nesting`. It stops the recursive passes over the tree from
    /// overflowing the stack.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting: 256,
            max_depth: 2048,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Token<'a> {
    Number(f64),
    Identifier(&'a str),
    Operator(BinaryOp),
    Open,
    Close,
}

/// A token and the byte range it covers in the input.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Spanned<'a> {
    token: Token<'a>,
    start: usize,
    end: usize,
}

fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True if the parser reads `name` as a variable: an identifier that is not
/// the name of a function.
pub(crate) fn is_variable_name(name: &str) -> bool {
    match name.as_bytes().split_first() {
        Some((&first, rest)) => {
            is_identifier_start(first)
                && rest.iter().all(|&b| is_identifier_byte(b))
                && UnaryOp::from_name(name).is_none()
        }
        None => false,
    }
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Tokenizer { text, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek_byte() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Digits, optionally followed by a fraction. A decimal point must be
    /// followed by at least one digit.
    fn number(&mut self, start: usize) -> Result<Token<'a>, SyntaxError> {
        self.skip_while(|b| b.is_ascii_digit());
        if let Some(b'.') = self.peek_byte() {
            self.pos += 1;
            match self.peek_byte() {
                Some(b) if b.is_ascii_digit() => self.skip_while(|b| b.is_ascii_digit()),
                _ => return Err(SyntaxError::InvalidNumber(start)),
            }
        }
        self.text[start..self.pos]
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| SyntaxError::InvalidNumber(start))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Spanned<'a>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_while(|b| b.is_ascii_whitespace());
        let start = self.pos;
        let c = self.text[start..].chars().next()?;
        let token = match c {
            '(' => {
                self.pos += 1;
                Ok(Token::Open)
            }
            ')' => {
                self.pos += 1;
                Ok(Token::Close)
            }
            '0'..='9' => self.number(start),
            c if c.is_ascii() && is_identifier_start(c as u8) => {
                self.skip_while(is_identifier_byte);
                Ok(Token::Identifier(&self.text[start..self.pos]))
            }
            c => match BinaryOp::from_symbol(c) {
                Some(op) => {
                    self.pos += 1;
                    Ok(Token::Operator(op))
                }
                None => Err(SyntaxError::UnexpectedCharacter(c, start)),
            },
        };
        Some(token.map(|token| Spanned {
            token,
            start,
            end: self.pos,
        }))
    }
}

/// Recursive descent parser. Each binary precedence level is parsed by a loop
/// that folds operands to the left, so all binary operators, including `^`,
/// are left associative.
struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    /// Length of the input, reported as the position of errors at the end.
    end: usize,
    nesting: usize,
    variables: Vec<String>,
    config: ParserConfig,
}

/// A parsed subtree and its depth.
type Parsed = (Node, usize);

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Spanned<'a>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check_depth(&self, depth: usize, pos: usize) -> Result<(), SyntaxError> {
        if depth > self.config.max_depth {
            return Err(SyntaxError::NestingTooDeep(pos));
        }
        Ok(())
    }

    fn check_nesting(&self, pos: usize) -> Result<(), SyntaxError> {
        if self.nesting > self.config.max_nesting {
            return Err(SyntaxError::NestingTooDeep(pos));
        }
        Ok(())
    }

    fn variable(&mut self, name: &str) -> usize {
        match self.variables.iter().position(|v| v == name) {
            Some(index) => index,
            None => {
                trace!(
                    "Parser: registered variable '{}' with index {}",
                    name,
                    self.variables.len()
                );
                self.variables.push(name.to_string());
                self.variables.len() - 1
            }
        }
    }

    fn expression(&mut self) -> Result<Parsed, SyntaxError> {
        self.binary_level(&[BinaryOp::Add, BinaryOp::Subtract], Self::term)
    }

    fn term(&mut self) -> Result<Parsed, SyntaxError> {
        self.binary_level(&[BinaryOp::Multiply, BinaryOp::Divide], Self::power)
    }

    fn power(&mut self) -> Result<Parsed, SyntaxError> {
        self.binary_level(&[BinaryOp::Pow], Self::primary)
    }

    /// Parse a sequence of operands joined by any of `ops`.
    fn binary_level(
        &mut self,
        ops: &[BinaryOp],
        operand: fn(&mut Self) -> Result<Parsed, SyntaxError>,
    ) -> Result<Parsed, SyntaxError> {
        let (mut lhs, mut depth) = operand(self)?;
        while let Some(&Spanned {
            token: Token::Operator(op),
            start,
            ..
        }) = self.peek()
        {
            if !ops.contains(&op) {
                break;
            }
            self.pos += 1;
            let (rhs, rdepth) = operand(self)?;
            depth = 1 + usize::max(depth, rdepth);
            self.check_depth(depth, start)?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        return Ok((lhs, depth));
    }

    /// Parse an expression enclosed in parentheses. The opening parenthesis
    /// has already been consumed.
    fn group(&mut self, open: usize) -> Result<Parsed, SyntaxError> {
        self.nesting += 1;
        self.check_nesting(open)?;
        let inner = self.expression()?;
        match self.advance() {
            Some(Spanned {
                token: Token::Close,
                ..
            }) => {}
            _ => return Err(SyntaxError::UnclosedParenthesis(open)),
        }
        self.nesting -= 1;
        return Ok(inner);
    }

    fn primary(&mut self) -> Result<Parsed, SyntaxError> {
        let Some(Spanned { token, start, end }) = self.advance() else {
            return Err(SyntaxError::MissingOperand(self.end));
        };
        match token {
            Token::Number(value) => Ok((Node::Number(value), 1)),
            Token::Open => self.group(start),
            Token::Close if self.nesting == 0 => {
                Err(SyntaxError::UnmatchedClosingParenthesis(start))
            }
            Token::Close => Err(SyntaxError::MissingOperand(start)),
            // A minus sign directly followed by a number is part of the literal.
            Token::Operator(BinaryOp::Subtract) => match self.peek() {
                Some(&Spanned {
                    token: Token::Number(value),
                    start: num_start,
                    ..
                }) if num_start == end => {
                    self.pos += 1;
                    Ok((Node::Number(-value), 1))
                }
                _ => Err(SyntaxError::MissingOperand(start)),
            },
            Token::Operator(_) => Err(SyntaxError::MissingOperand(start)),
            Token::Identifier(name) => {
                let call = matches!(
                    self.peek(),
                    Some(Spanned {
                        token: Token::Open,
                        ..
                    })
                );
                match (UnaryOp::from_name(name), call) {
                    (Some(op), true) => {
                        let open = self.tokens[self.pos].start;
                        self.pos += 1;
                        let (input, depth) = self.group(open)?;
                        self.check_depth(depth + 1, start)?;
                        Ok((Node::Unary(op, Box::new(input)), depth + 1))
                    }
                    (Some(_), false) => Err(SyntaxError::ReservedName(name.to_string(), start)),
                    (None, true) => Err(SyntaxError::UnknownFunction(name.to_string(), start)),
                    (None, false) => Ok((Node::Variable(self.variable(name)), 1)),
                }
            }
        }
    }
}

/// Parse a formula with the default configuration. See `parse_with`.
pub fn parse(text: &str) -> Result<Equation, SyntaxError> {
    parse_with(text, &ParserConfig::default())
}

/**
Parse the textual form of a formula into an equation.

The grammar, from the loosest to the tightest binding level:

```text
Expr    := Term (('+' | '-') Term)*
Term    := Power (('*' | '/') Power)*
Power   := Primary ('^' Primary)*
Primary := Number | '-' Number | Identifier | Function '(' Expr ')' | '(' Expr ')'
```

All binary operators are left associative, including `^`: `2^3^2` is
`(2^3)^2`. A `-` is a sign only when it starts an operand and is immediately
followed by a digit, so `-2^2` is `(-2)^2`. There is no unary minus for other
operands; write `0 - x` or `-1*x` instead. Only `.` is accepted as the decimal
separator. Whitespace between tokens is ignored.

Identifiers that are not function names become variables. Variables are
indexed in the order of their first occurrence in the text.

Input nested deeper than `config.max_nesting`, or whose tree would be deeper
than `config.max_depth`, is rejected with `SyntaxError::NestingTooDeep`.
*/
pub fn parse_with(text: &str, config: &ParserConfig) -> Result<Equation, SyntaxError> {
    let tokens = Tokenizer::new(text).collect::<Result<Vec<_>, _>>()?;
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyInput);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
        nesting: 0,
        variables: Vec::new(),
        config: *config,
    };
    let (root, _depth) = parser.expression()?;
    if let Some(next) = parser.peek() {
        return Err(match next.token {
            Token::Close => SyntaxError::UnmatchedClosingParenthesis(next.start),
            _ => SyntaxError::TrailingInput(next.start),
        });
    }
    return Ok(Equation::from_parts(root, parser.variables));
}

impl std::str::FromStr for Equation {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
