use crate::{
    error::DomainError,
    ops::{
        BinaryOp::{self, *},
        UnaryOp::{self, *},
    },
    tree::{Equation, Node},
};

/// Tolerance used to decide that an angle is a nonzero multiple of π, i.e.
/// that its cotangent is undefined. It is compared to the distance between
/// `x / π` and the nearest integer.
pub const EPSILON: f64 = 1e-12;

/// True if the tangent of `value` is zero, up to rounding of π.
fn is_tangent_zero(value: f64) -> bool {
    let turns = value / std::f64::consts::PI;
    let nearest = turns.round();
    value == 0. || (nearest != 0. && f64::abs(turns - nearest) < EPSILON)
}

impl UnaryOp {
    /// Compute the result of the operation on `value`.
    pub fn apply(&self, value: f64) -> Result<f64, DomainError> {
        Ok(match self {
            Ln => {
                if value <= 0. {
                    return Err(DomainError::NonPositiveLogarithm(value));
                }
                f64::ln(value)
            }
            Sqrt => {
                if value < 0. {
                    return Err(DomainError::NegativeSquareRoot(value));
                }
                f64::sqrt(value)
            }
            Cos => f64::cos(value),
            Sin => f64::sin(value),
            Tg => f64::tan(value),
            Ctg => {
                if is_tangent_zero(value) {
                    return Err(DomainError::CotangentUndefined(value));
                }
                f64::cos(value) / f64::sin(value)
            }
            Arcsin | Arccos => {
                if !(-1. ..=1.).contains(&value) {
                    return Err(DomainError::InverseTrigOutOfRange(*self, value));
                }
                if let Arcsin = self {
                    f64::asin(value)
                } else {
                    f64::acos(value)
                }
            }
            Arctg => f64::atan(value),
            Arcctg => std::f64::consts::FRAC_PI_2 - f64::atan(value),
        })
    }
}

impl BinaryOp {
    /// Compute the result of the operation on `lhs` and `rhs`. Results that
    /// are infinite or NaN are errors, so folded literals are always finite.
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, DomainError> {
        let result = match self {
            Add => lhs + rhs,
            Subtract => lhs - rhs,
            Multiply => lhs * rhs,
            Divide => {
                if rhs == 0. {
                    return Err(DomainError::DivisionByZero);
                }
                lhs / rhs
            }
            Pow => f64::powf(lhs, rhs),
        };
        if result.is_nan() {
            return Err(DomainError::NotANumber(*self));
        }
        if result.is_infinite() {
            return Err(DomainError::Overflow(*self));
        }
        return Ok(result);
    }
}

impl Node {
    /// Compute the value of this subtree. `values[i]` is the value of the
    /// variable with index `i`. The first domain error encountered aborts the
    /// evaluation.
    ///
    /// # Panics
    ///
    /// If the tree refers to a variable index outside `values`.
    pub fn evaluate(&self, values: &[f64]) -> Result<f64, DomainError> {
        match self {
            Node::Number(val) => Ok(*val),
            Node::Variable(i) => Ok(values[*i]),
            Node::Unary(op, input) => op.apply(input.evaluate(values)?),
            Node::Binary(op, lhs, rhs) => op.apply(lhs.evaluate(values)?, rhs.evaluate(values)?),
        }
    }
}

impl Equation {
    /// Compute the value of the equation. `values` holds one value per
    /// variable, in the order of `variables()`. Use `bind` to build it from
    /// names.
    ///
    /// # Panics
    ///
    /// If `values` is shorter than the variable table.
    pub fn evaluate(&self, values: &[f64]) -> Result<f64, DomainError> {
        self.root().evaluate(values)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_float_eq, parse, test::check_equation_eval};

    #[test]
    fn t_precedence() {
        assert_eq!(parse("2+3*4").unwrap().evaluate(&[]).unwrap(), 14.);
        assert_eq!(parse("(2+3)*4").unwrap().evaluate(&[]).unwrap(), 20.);
        assert_eq!(parse("2*3^2").unwrap().evaluate(&[]).unwrap(), 18.);
        assert_eq!(parse("10-4-3").unwrap().evaluate(&[]).unwrap(), 3.);
        assert_eq!(parse("16/4/2").unwrap().evaluate(&[]).unwrap(), 2.);
    }

    #[test]
    fn t_pow_left_associative() {
        // (2^3)^2, not 2^(3^2).
        assert_eq!(parse("2^3^2").unwrap().evaluate(&[]).unwrap(), 64.);
    }

    #[test]
    fn t_variables() {
        let eq = parse("x*y + x").unwrap();
        assert_eq!(eq.evaluate(&[2., 5.]).unwrap(), 12.);
        let values = eq.bind(&[("x", 3.), ("y", -1.)]).unwrap();
        assert_eq!(eq.evaluate(&values).unwrap(), 0.);
    }

    #[test]
    fn t_domain_errors() {
        assert_eq!(
            parse("ln(-1)").unwrap().evaluate(&[]),
            Err(DomainError::NonPositiveLogarithm(-1.))
        );
        assert_eq!(
            parse("ln(0)").unwrap().evaluate(&[]),
            Err(DomainError::NonPositiveLogarithm(0.))
        );
        assert_eq!(
            parse("1/0").unwrap().evaluate(&[]),
            Err(DomainError::DivisionByZero)
        );
        assert_eq!(
            parse("arcsin(2)").unwrap().evaluate(&[]),
            Err(DomainError::InverseTrigOutOfRange(Arcsin, 2.))
        );
        assert_eq!(
            parse("arccos(-1.5)").unwrap().evaluate(&[]),
            Err(DomainError::InverseTrigOutOfRange(Arccos, -1.5))
        );
        assert_eq!(
            parse("ctg(0)").unwrap().evaluate(&[]),
            Err(DomainError::CotangentUndefined(0.))
        );
        assert_eq!(
            parse("sqrt(-4)").unwrap().evaluate(&[]),
            Err(DomainError::NegativeSquareRoot(-4.))
        );
        assert_eq!(
            parse("10^400").unwrap().evaluate(&[]),
            Err(DomainError::Overflow(Pow))
        );
        assert_eq!(
            parse("(0-8)^0.5").unwrap().evaluate(&[]),
            Err(DomainError::NotANumber(Pow))
        );
        assert_eq!(
            parse("0^-1").unwrap().evaluate(&[]),
            Err(DomainError::Overflow(Pow))
        );
        let eq = parse("x * 1.5").unwrap();
        assert_eq!(eq.evaluate(&[f64::MAX]), Err(DomainError::Overflow(Multiply)));
    }

    #[test]
    fn t_cotangent_poles() {
        use std::f64::consts::PI;
        let eq = parse("ctg(x)").unwrap();
        for x in [0., PI, -PI, 2. * PI, 7. * PI] {
            assert_eq!(eq.evaluate(&[x]), Err(DomainError::CotangentUndefined(x)));
        }
        assert_eq!(
            parse("ctg(3.141592653589793)").unwrap().evaluate(&[]),
            Err(DomainError::CotangentUndefined(PI))
        );
        // Small angles are not poles.
        assert_float_eq!(eq.evaluate(&[1e-13]).unwrap(), 1e13, 1.);
        assert_float_eq!(eq.evaluate(&[PI / 4.]).unwrap(), 1., 1e-15);
        assert!(eq.evaluate(&[PI + 1e-6]).is_ok());
    }

    #[test]
    fn t_first_error_wins() {
        // The left operand is evaluated first.
        assert_eq!(
            parse("ln(0) + 1/0").unwrap().evaluate(&[]),
            Err(DomainError::NonPositiveLogarithm(0.))
        );
        let eq = parse("x / (x - 1)").unwrap();
        assert_eq!(eq.evaluate(&[1.]), Err(DomainError::DivisionByZero));
        assert_eq!(eq.evaluate(&[2.]).unwrap(), 2.);
    }

    #[test]
    fn t_inverse_trig_bounds() {
        assert_float_eq!(
            parse("arcsin(1)").unwrap().evaluate(&[]).unwrap(),
            std::f64::consts::FRAC_PI_2
        );
        assert_float_eq!(
            parse("arccos(-1)").unwrap().evaluate(&[]).unwrap(),
            std::f64::consts::PI
        );
        assert_float_eq!(
            parse("arcctg(0)").unwrap().evaluate(&[]).unwrap(),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn t_trig_functions() {
        check_equation_eval(
            parse("sin(x)^2 + cos(x)^2").unwrap(),
            |_vars: &[f64]| 1.,
            &[(-6., 6.)],
            100,
            1e-15,
        );
        check_equation_eval(
            parse("tg(x) * ctg(x)").unwrap(),
            |_vars: &[f64]| 1.,
            &[(0.1, 1.4)],
            100,
            1e-14,
        );
        check_equation_eval(
            parse("arctg(x) + arcctg(x)").unwrap(),
            |_vars: &[f64]| std::f64::consts::FRAC_PI_2,
            &[(-10., 10.)],
            100,
            1e-15,
        );
    }

    #[test]
    fn t_mixed_tree() {
        check_equation_eval(
            parse("ln(sin(x) + 2)^3 / (cos(x) + 2) - sqrt(y * y + 1)").unwrap(),
            |vars: &[f64]| {
                let (x, y) = (vars[0], vars[1]);
                f64::powf(f64::ln(f64::sin(x) + 2.), 3.) / (f64::cos(x) + 2.)
                    - f64::sqrt(y * y + 1.)
            },
            &[(-2.5, 2.5), (-3., 3.)],
            20,
            0.,
        );
    }
}
