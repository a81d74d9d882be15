use crate::{
    error::{EquationError, Error},
    tree::{Equation, add, mul, num, pow, sub, var},
};
use log::debug;

/// Name given to the variable of the polynomial expanded from an equation
/// without variables.
const DEFAULT_VARIABLE: &str = "x";

impl Equation {
    /// Maclaurin expansion of the equation up to and including the term of
    /// degree `order`. See `expand_taylor_at`.
    pub fn expand_taylor(&self, order: usize) -> Result<Equation, Error> {
        self.expand_taylor_at(0., order)
    }

    /**
    Taylor expansion of the equation around `point`, up to and including the
    term of degree `order`. The equation must have at most one variable.

    The polynomial is built left to right, as in
    `((c0 + (c1 * (x - a)^1)) + (c2 * (x - a)^2))`, where `ci` is the i-th
    derivative at `a` divided by `i!`. Around zero the terms are written
    `(x ^ i)` instead of `((x - 0) ^ i)`. Coefficients are not simplified
    away even when they are zero; simplify the result if needed.

    Each derivative is simplified before it is differentiated again, so a
    domain error found while folding constants aborts the expansion. So does a
    derivative that can't be evaluated at `point`.

    The result has the variable table of this equation. An equation without
    variables is expanded as a polynomial of a variable named `x`.
    */
    pub fn expand_taylor_at(&self, point: f64, order: usize) -> Result<Equation, Error> {
        if self.num_variables() > 1 {
            return Err(EquationError::TooManyVariables(self.num_variables()).into());
        }
        let at = [point];
        let mut deriv = self.root().clone();
        let mut sum = num(deriv.evaluate(&at)?);
        let mut n_fact = 1.;
        for n in 1..=order {
            deriv = deriv.derivative(0);
            deriv.simplify()?;
            let coeff = deriv.evaluate(&at)?;
            n_fact *= n as f64;
            debug!(
                "Taylor: derivative {} has {} node(s), coefficient {}",
                n,
                deriv.len(),
                coeff / n_fact
            );
            let base = if point == 0. {
                var(0)
            } else {
                sub(var(0), num(point))
            };
            sum = add(sum, mul(num(coeff / n_fact), pow(base, num(n as f64))));
        }
        let variables = if self.num_variables() == 0 {
            vec![DEFAULT_VARIABLE.to_string()]
        } else {
            self.variables().to_vec()
        };
        return Ok(Equation::from_parts(sum, variables));
    }
}
