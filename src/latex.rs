use crate::{
    ops::{BinaryOp, BinaryOp::*, LEAF_PRECEDENCE, UnaryOp::*},
    tree::{Equation, Node},
};

impl Equation {
    /// Produce the latex expression for the equation. Parentheses are only
    /// added where the precedence of the operators requires them.
    pub fn to_latex(&self) -> String {
        to_latex(self.root(), self.variables())
    }
}

/// Produce the latex expression for the subtree of a single node.
fn to_latex(node: &Node, variables: &[String]) -> String {
    match node {
        Node::Number(val) => val.to_string(),
        Node::Variable(i) => match variables.get(*i) {
            Some(name) => name.clone(),
            None => format!("v_{{{i}}}"),
        },
        Node::Unary(op, input) => {
            let ix = to_latex(input, variables);
            match op {
                Ln => format!("\\ln\\left({{{ix}}}\\right)"),
                Sqrt => format!("\\sqrt{{{ix}}}"),
                Cos => format!("\\cos\\left({{{ix}}}\\right)"),
                Sin => format!("\\sin\\left({{{ix}}}\\right)"),
                Tg => format!("\\operatorname{{tg}}\\left({{{ix}}}\\right)"),
                Ctg => format!("\\operatorname{{ctg}}\\left({{{ix}}}\\right)"),
                Arcsin => format!("\\arcsin\\left({{{ix}}}\\right)"),
                Arccos => format!("\\arccos\\left({{{ix}}}\\right)"),
                Arctg => format!("\\operatorname{{arctg}}\\left({{{ix}}}\\right)"),
                Arcctg => format!("\\operatorname{{arcctg}}\\left({{{ix}}}\\right)"),
            }
        }
        Node::Binary(op, lhs, rhs) => {
            let (lx, rx) = parens_binary(
                *op,
                lhs,
                rhs,
                to_latex(lhs, variables),
                to_latex(rhs, variables),
            );
            match op {
                Add => format!("{{{lx}}} + {{{rx}}}"),
                Subtract => format!("{{{lx}}} - {{{rx}}}"),
                Multiply => format!("{{{lx}}}\\cdot{{{rx}}}"),
                Divide => format!("\\dfrac{{{lx}}}{{{rx}}}"),
                Pow => format!("{{{lx}}}^{{{rx}}}"),
            }
        }
    }
}

fn precedence(node: &Node) -> u8 {
    match node.opcode() {
        Some(op) => op.precedence(),
        None => LEAF_PRECEDENCE,
    }
}

fn is_negative_number(node: &Node) -> bool {
    matches!(node.as_number(), Some(val) if val.is_sign_negative())
}

/// Look at the two operands (`lnode` and `rnode`) of a binary op, and decide if
/// the latex strings of the operands (`lx` and `rx` respectively) should be
/// wrapped in parentheses. An operand is wrapped when its operator binds more
/// loosely than `op`. On the right side of a non-commutative operator, an
/// operand with the same precedence is wrapped as well.
fn parens_binary(
    op: BinaryOp,
    lnode: &Node,
    rnode: &Node,
    lx: String,
    rx: String,
) -> (String, String) {
    match op {
        // The fraction bar groups both operands.
        Divide => (lx, rx),
        // The exponent is raised, so only the base may need parentheses.
        Pow => (
            match lnode {
                Node::Number(_) if is_negative_number(lnode) => with_parens(lx),
                Node::Number(_) | Node::Variable(_) => lx,
                Node::Unary(..) | Node::Binary(..) => with_parens(lx),
            },
            rx,
        ),
        Add | Subtract | Multiply => {
            let lx = if precedence(lnode) < op.precedence() {
                with_parens(lx)
            } else {
                lx
            };
            let rprec = precedence(rnode);
            let rx = if rprec < op.precedence()
                || (rprec == op.precedence() && !op.is_commutative())
                || is_negative_number(rnode)
            {
                with_parens(rx)
            } else {
                rx
            };
            (lx, rx)
        }
    }
}

fn with_parens(latex: String) -> String {
    format!("\\left({latex}\\right)")
}

#[cfg(test)]
mod test {
    use crate::parse;

    fn latex(text: &str) -> String {
        parse(text).unwrap().to_latex()
    }

    #[test]
    fn t_leaves() {
        assert_eq!(latex("x"), "x");
        assert_eq!(latex("2.5"), "2.5");
        assert_eq!(latex("-3"), "-3");
    }

    #[test]
    fn t_functions() {
        assert_eq!(latex("sin(x)"), "\\sin\\left({x}\\right)");
        assert_eq!(latex("sqrt(x + 1)"), "\\sqrt{{x} + {1}}");
        assert_eq!(
            latex("ln(2*x)"),
            "\\ln\\left({{2}\\cdot{x}}\\right)"
        );
        assert_eq!(latex("tg(x)"), "\\operatorname{tg}\\left({x}\\right)");
        assert_eq!(
            latex("arcctg(x)"),
            "\\operatorname{arcctg}\\left({x}\\right)"
        );
    }

    #[test]
    fn t_add_sub() {
        assert_eq!(latex("x + y"), "{x} + {y}");
        assert_eq!(latex("x + y + z"), "{{x} + {y}} + {z}");
        assert_eq!(latex("x - (y + z)"), "{x} - {\\left({y} + {z}\\right)}");
        assert_eq!(latex("x + (y - z)"), "{x} + {{y} - {z}}");
        assert_eq!(latex("x - y - z"), "{{x} - {y}} - {z}");
        assert_eq!(latex("x + -2"), "{x} + {\\left(-2\\right)}");
    }

    #[test]
    fn t_mul() {
        assert_eq!(latex("2*x"), "{2}\\cdot{x}");
        assert_eq!(
            latex("(x + 1)*y"),
            "{\\left({x} + {1}\\right)}\\cdot{y}"
        );
        assert_eq!(
            latex("x*(y - 1)"),
            "{x}\\cdot{\\left({y} - {1}\\right)}"
        );
        assert_eq!(latex("x*sin(y)"), "{x}\\cdot{\\sin\\left({y}\\right)}");
        assert_eq!(latex("x*y^2"), "{x}\\cdot{{y}^{2}}");
    }

    #[test]
    fn t_div() {
        assert_eq!(latex("(x + 1)/(x - 1)"), "\\dfrac{{x} + {1}}{{x} - {1}}");
        assert_eq!(latex("x/y/z"), "\\dfrac{\\dfrac{x}{y}}{z}");
    }

    #[test]
    fn t_pow() {
        assert_eq!(latex("x^2"), "{x}^{2}");
        assert_eq!(latex("(x + 1)^2"), "{\\left({x} + {1}\\right)}^{2}");
        assert_eq!(latex("x^(y + 1)"), "{x}^{{y} + {1}}");
        assert_eq!(latex("-2^x"), "{\\left(-2\\right)}^{x}");
        assert_eq!(
            latex("sin(x)^2"),
            "{\\left(\\sin\\left({x}\\right)\\right)}^{2}"
        );
        assert_eq!(latex("x^2^3"), "{\\left({x}^{2}\\right)}^{3}");
    }
}
