use crate::{assert_float_eq, tree::Equation};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Helper for sampling multiple variables at once.
pub(crate) struct Sampler {
    samples_per_var: usize,
    var_samples: Vec<f64>,
    sample: Vec<f64>,
    counter: Vec<usize>,
    done: bool,
}

impl Sampler {
    /**
    Create a sampler for all the variables. `ranges` contains one (lower,
    upper) pair per variable, in variable index order. Each variable is
    sampled between its bounds `samples_per_var` times.
    */
    pub fn new(ranges: &[(f64, f64)], samples_per_var: usize, seed: u64) -> Sampler {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut var_samples = Vec::with_capacity(ranges.len() * samples_per_var);
        for &(lower, upper) in ranges {
            let span = upper - lower;
            for _ in 0..samples_per_var {
                var_samples.push(lower + rng.random::<f64>() * span);
            }
        }
        Sampler {
            samples_per_var,
            var_samples,
            sample: vec![f64::NAN; ranges.len()],
            counter: vec![0; ranges.len()],
            done: samples_per_var == 0,
        }
    }

    pub fn next(&mut self) -> Option<&[f64]> {
        if self.done {
            return None;
        }
        for (i, c) in self.counter.iter().enumerate() {
            self.sample[i] = self.var_samples[i * self.samples_per_var + *c];
        }
        for c in self.counter.iter_mut() {
            *c += 1;
            if *c < self.samples_per_var {
                break;
            } else {
                *c = 0;
            }
        }
        if self.counter.iter().all(|c| *c == 0) {
            self.done = true;
        }
        Some(&self.sample)
    }
}

/**
Evaluate `eq` at randomly sampled variable values and compare the result to
the one returned by `expectedfn` for the same inputs. The values must be
within `eps` of each other.

`ranges` holds the (lower, upper) sampling bounds of each variable of the
equation, in variable index order.
*/
pub fn check_equation_eval<F>(
    eq: Equation,
    mut expectedfn: F,
    ranges: &[(f64, f64)],
    samples_per_var: usize,
    eps: f64,
) where
    F: FnMut(&[f64]) -> f64,
{
    assert_eq!(
        eq.num_variables(),
        ranges.len(),
        "Expected one sampling range per variable"
    );
    let mut sampler = Sampler::new(ranges, samples_per_var, 42);
    while let Some(sample) = sampler.next() {
        let result = eq.evaluate(sample).unwrap();
        assert_float_eq!(expectedfn(sample), result, eps, sample);
    }
}

/// Compare `eq1` and `eq2` by evaluating them at randomly sampled values.
/// Both equations must have the same variable table. `ranges` holds the
/// (min, max) range from which each variable is sampled, in variable index
/// order. Each variable will be sampled `samples_per_var` times, and the
/// equations will be compared at all combinations of samples. That means,
/// if the equations have 2 variables and `samples_per_var` is 20, they will
/// be evaluated and compared with 20 ^ 2 = 400 different samples. This test
/// asserts that the values of the two equations don't differ by more than
/// `eps` at any of the samples.
pub fn compare_equations(
    eq1: &Equation,
    eq2: &Equation,
    ranges: &[(f64, f64)],
    samples_per_var: usize,
    eps: f64,
) {
    assert_eq!(
        eq1.variables(),
        eq2.variables(),
        "Equations must have the same variables"
    );
    assert_eq!(
        eq1.num_variables(),
        ranges.len(),
        "Expected one sampling range per variable"
    );
    let mut sampler = Sampler::new(ranges, samples_per_var, 42);
    while let Some(sample) = sampler.next() {
        let a = eq1.evaluate(sample).unwrap();
        let b = eq2.evaluate(sample).unwrap();
        assert_float_eq!(a, b, eps, sample);
    }
}

#[test]
fn t_sampler_visits_all_combinations() {
    let mut sampler = Sampler::new(&[(0., 1.), (10., 20.)], 3, 42);
    let mut count = 0;
    while let Some(sample) = sampler.next() {
        assert!((0. ..=1.).contains(&sample[0]));
        assert!((10. ..=20.).contains(&sample[1]));
        count += 1;
    }
    assert_eq!(count, 9);
}

#[test]
fn t_sampler_without_variables() {
    let mut sampler = Sampler::new(&[], 5, 42);
    assert_eq!(sampler.next(), Some(&[][..]));
    assert_eq!(sampler.next(), None);
}
