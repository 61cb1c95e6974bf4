//! Money-weighted annualized return (XIRR)
//!
//! Finds the rate `r` for which the net present value of a dated cash-flow
//! series is zero:
//!
//! ```text
//! NPV(r) = Σ amount_i / (1 + r)^(days_i / 365)
//! ```
//!
//! where `days_i` is measured from the date of the first flow. The solver
//! runs Newton-Raphson from an initial guess and falls back to bisection
//! over a bracketing interval when Newton stalls, diverges, or runs out of
//! iterations. Both phases are capped by `max_iterations`.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use core_kernel::year_fraction;

use crate::cash_flow::CashFlow;

/// Default starting rate (10%)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Default iteration cap for each solver phase
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default convergence tolerance on the rate
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Iterates are kept strictly above -100%
const MIN_RATE: f64 = -0.999_999;

/// Below this slope Newton steps are meaningless
const FLAT_SLOPE: f64 = 1e-10;

/// Rates probed when searching for a sign change of NPV
const BRACKET_GRID: [f64; 16] = [
    MIN_RATE, -0.99, -0.9, -0.75, -0.5, -0.25, 0.0, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 100.0,
    1_000.0,
];

/// Errors returned by the XIRR solver
#[derive(Debug, Clone, Error, PartialEq)]
pub enum XirrError {
    #[error("At least two cash flows are required, got {count}")]
    InsufficientCashFlows { count: usize },

    #[error("Cash flows never change sign; no rate can zero their net present value")]
    NoSignChange,

    #[error("XIRR did not converge after {iterations} iterations (last rate {last_rate})")]
    NonConvergent { last_rate: f64, iterations: u32 },
}

/// Root-finding phase that produced the rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XirrMethod {
    Newton,
    Bisection,
}

/// A converged XIRR
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XirrSolution {
    /// Annualized rate as a decimal fraction (0.1 = 10%)
    pub rate: f64,
    /// Iterations spent across both phases
    pub iterations: u32,
    pub method: XirrMethod,
}

/// Where a failed phase stopped
#[derive(Debug, Clone, Copy)]
struct Attempt {
    last_rate: f64,
    iterations: u32,
}

/// Bounded XIRR solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XirrSolver {
    pub initial_guess: f64,
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for XirrSolver {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl XirrSolver {
    /// Creates a solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Solves for the rate zeroing the NPV of `flows`
    ///
    /// # Errors
    ///
    /// - `XirrError::InsufficientCashFlows` for fewer than two flows
    /// - `XirrError::NoSignChange` when no flow has the opposite sign of another
    /// - `XirrError::NonConvergent` when neither phase converges
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use domain_portfolio::{CashFlow, XirrSolver};
    /// use rust_decimal_macros::dec;
    ///
    /// let flows = vec![
    ///     CashFlow::new(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), dec!(-100)),
    ///     CashFlow::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), dec!(110)),
    /// ];
    /// let solution = XirrSolver::new().solve(&flows).unwrap();
    /// assert!((solution.rate - 0.10).abs() < 1e-6);
    /// ```
    #[instrument(skip_all, fields(flows = flows.len()))]
    pub fn solve(&self, flows: &[CashFlow]) -> Result<XirrSolution, XirrError> {
        if flows.len() < 2 {
            return Err(XirrError::InsufficientCashFlows { count: flows.len() });
        }

        let points = discount_points(flows);
        let has_negative = points.iter().any(|&(_, amount)| amount < 0.0);
        let has_positive = points.iter().any(|&(_, amount)| amount > 0.0);
        if !has_negative || !has_positive {
            return Err(XirrError::NoSignChange);
        }

        let newton = match self.newton(&points) {
            Ok(solution) => return Ok(solution),
            Err(attempt) => attempt,
        };
        debug!(
            last_rate = newton.last_rate,
            iterations = newton.iterations,
            "Newton-Raphson did not converge, falling back to bisection"
        );

        match self.bisect(&points) {
            Ok(mut solution) => {
                solution.iterations += newton.iterations;
                Ok(solution)
            }
            Err(bisection) => Err(XirrError::NonConvergent {
                last_rate: bisection.map_or(newton.last_rate, |b| b.last_rate),
                iterations: newton.iterations + bisection.map_or(0, |b| b.iterations),
            }),
        }
    }

    fn newton(&self, points: &[(f64, f64)]) -> Result<XirrSolution, Attempt> {
        let mut rate = self.initial_guess.max(MIN_RATE);

        for iteration in 1..=self.max_iterations {
            let (value, slope) = npv_and_derivative(points, rate);
            if !value.is_finite() || !slope.is_finite() || slope.abs() < FLAT_SLOPE {
                return Err(Attempt { last_rate: rate, iterations: iteration });
            }

            let next = rate - value / slope;
            if !next.is_finite() {
                return Err(Attempt { last_rate: rate, iterations: iteration });
            }

            if (next - rate).abs() < self.tolerance && next > -1.0 {
                return Ok(XirrSolution {
                    rate: next,
                    iterations: iteration,
                    method: XirrMethod::Newton,
                });
            }

            rate = next.max(MIN_RATE);
        }

        Err(Attempt { last_rate: rate, iterations: self.max_iterations })
    }

    /// Bisection inside the sign-change bracket closest to the initial guess.
    /// `Err(None)` means no bracket exists on the probe grid.
    fn bisect(&self, points: &[(f64, f64)]) -> Result<XirrSolution, Option<Attempt>> {
        let samples: Vec<(f64, f64)> = BRACKET_GRID
            .iter()
            .map(|&rate| (rate, npv(points, rate)))
            .filter(|(_, value)| value.is_finite())
            .collect();

        if let Some(&(rate, _)) = samples.iter().find(|(_, value)| *value == 0.0) {
            return Ok(XirrSolution { rate, iterations: 0, method: XirrMethod::Bisection });
        }

        let guess = self.initial_guess;
        let distance = |lo: f64, hi: f64| ((lo + hi) / 2.0 - guess).abs();
        let (mut lo, mut f_lo, mut hi) = samples
            .windows(2)
            .filter(|w| w[0].1.signum() != w[1].1.signum())
            .map(|w| (w[0].0, w[0].1, w[1].0))
            .min_by(|a, b| distance(a.0, a.2).total_cmp(&distance(b.0, b.2)))
            .ok_or(None)?;

        let mut mid = (lo + hi) / 2.0;
        for iteration in 1..=self.max_iterations {
            mid = (lo + hi) / 2.0;
            let f_mid = npv(points, mid);

            if f_mid == 0.0 || (hi - lo) / 2.0 < self.tolerance {
                return Ok(XirrSolution {
                    rate: mid,
                    iterations: iteration,
                    method: XirrMethod::Bisection,
                });
            }

            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        Err(Some(Attempt { last_rate: mid, iterations: self.max_iterations }))
    }
}

/// Net present value of `flows` at `rate`, discounted to the first flow's date
pub fn net_present_value(flows: &[CashFlow], rate: f64) -> f64 {
    npv(&discount_points(flows), rate)
}

/// (years since first flow, amount) per flow
fn discount_points(flows: &[CashFlow]) -> Vec<(f64, f64)> {
    let Some(first) = flows.first() else {
        return Vec::new();
    };

    flows
        .iter()
        .map(|cf| {
            (
                year_fraction(first.date, cf.date),
                cf.amount.to_f64().unwrap_or_default(),
            )
        })
        .collect()
}

fn npv(points: &[(f64, f64)], rate: f64) -> f64 {
    points
        .iter()
        .map(|&(years, amount)| amount * (1.0 + rate).powf(-years))
        .sum()
}

fn npv_and_derivative(points: &[(f64, f64)], rate: f64) -> (f64, f64) {
    points
        .iter()
        .fold((0.0, 0.0), |(value, slope), &(years, amount)| {
            (
                value + amount * (1.0 + rate).powf(-years),
                // d/dr [a (1+r)^-t] = -t a (1+r)^(-t-1)
                slope - years * amount * (1.0 + rate).powf(-years - 1.0),
            )
        })
}
