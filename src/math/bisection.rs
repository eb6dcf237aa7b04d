use tracing::{debug, trace, warn};

use crate::error::{FitError, Result};

/// Outcome of evaluating one trial value in a [`Bisection`] search.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The trial value satisfies the target; the search stops.
    Found(T),
    /// The solution lies above the trial value.
    TooLow,
    /// The solution lies below the trial value.
    TooHigh,
}

/// Bounded bisection search over a positive scalar.
///
/// Until both a floor and a ceiling are known, the trial value is doubled
/// (only a floor known) or halved (only a ceiling known); afterwards each step
/// takes the midpoint. Leaving `[lower_limit, upper_limit]` fails with
/// [`FitError::RequiredRadiusBelowMinimum`], since every search in this crate
/// is bounded by the minimum radius of curvature.
#[derive(Debug, Clone, Copy)]
pub struct Bisection {
    initial: f64,
    lower_limit: f64,
    upper_limit: f64,
    max_iterations: usize,
}

impl Bisection {
    /// Creates a search starting at `initial`, unbounded above zero.
    #[must_use]
    pub fn new(initial: f64, max_iterations: usize) -> Self {
        Self {
            initial,
            lower_limit: 0.0,
            upper_limit: f64::INFINITY,
            max_iterations,
        }
    }

    /// Restricts the trial values to `[lower, upper]`.
    #[must_use]
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.lower_limit = lower;
        self.upper_limit = upper;
        self
    }

    /// Runs the search, calling `evaluate` with each trial value.
    ///
    /// # Errors
    ///
    /// Propagates any error from `evaluate`. Returns
    /// [`FitError::RequiredRadiusBelowMinimum`] if the next trial leaves the
    /// limits, or [`FitError::NoAlignment`] once the iteration budget is spent.
    pub fn solve<T, F>(&self, mut evaluate: F) -> Result<T>
    where
        F: FnMut(f64) -> Result<Outcome<T>>,
    {
        let mut trial = self.initial;
        let mut floor: Option<f64> = None;
        let mut ceiling: Option<f64> = None;

        for iteration in 0..self.max_iterations {
            let next = match evaluate(trial)? {
                Outcome::Found(value) => {
                    debug!(iteration, trial, "bisection converged");
                    return Ok(value);
                }
                Outcome::TooLow => {
                    floor = Some(trial);
                    ceiling.map_or(trial * 2.0, |high| 0.5 * (trial + high))
                }
                Outcome::TooHigh => {
                    ceiling = Some(trial);
                    floor.map_or(trial * 0.5, |low| 0.5 * (low + trial))
                }
            };
            trace!(iteration, trial, next, ?floor, ?ceiling, "bisection step");
            trial = next;

            if trial > self.upper_limit || trial < self.lower_limit {
                return Err(FitError::RequiredRadiusBelowMinimum.into());
            }
        }

        warn!(iterations = self.max_iterations, "bisection did not converge");
        Err(FitError::NoAlignment {
            iterations: self.max_iterations,
        }
        .into())
    }
}
