//! Adaptive Simpson quadrature.
//!
//! Bounded-budget adaptive integration for the semi-analytic pricer's
//! oscillatory integrands. The interval is split recursively until the
//! Richardson error estimate for each piece drops below its share of the
//! tolerance; the total number of splits is capped so a non-convergent
//! integrand fails loudly instead of spinning.

use thiserror::Error;

/// Errors from adaptive quadrature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    /// The subdivision budget ran out before the error estimate converged.
    #[error("quadrature did not converge within {max_intervals} subdivisions over [{a}, {b}]")]
    BudgetExhausted {
        /// Subdivision budget that was exhausted.
        max_intervals: usize,
        /// Lower integration limit.
        a: f64,
        /// Upper integration limit.
        b: f64,
    },

    /// The integrand produced NaN or infinity.
    #[error("integrand is not finite at u = {at}")]
    NonFiniteIntegrand {
        /// Abscissa at which the integrand was non-finite.
        at: f64,
    },
}

/// Settings for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureConfig {
    /// Absolute tolerance on the integral estimate.
    pub tolerance: f64,
    /// Maximum number of interval subdivisions.
    pub max_intervals: usize,
}

impl Default for QuadratureConfig {
    /// Tolerance 1e-9 with a budget of 1000 subdivisions.
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_intervals: 1000,
        }
    }
}

/// Internal refinement failure, mapped to [`QuadratureError`] at the top.
enum RefineError {
    Budget,
    NonFinite(f64),
}

/// Simpson estimate over an interval of width `h` from pre-evaluated
/// endpoint and midpoint values.
#[inline]
fn simpson(h: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    h / 6.0 * (fa + 4.0 * fm + fb)
}

/// Integrates `f` over the finite interval `[a, b]`.
///
/// Uses adaptive Simpson subdivision with Richardson extrapolation: each
/// half-interval is accepted once its local error estimate is below 15x its
/// share of the tolerance, and the refined estimate includes the
/// extrapolation correction.
///
/// # Errors
///
/// - [`QuadratureError::BudgetExhausted`] when the subdivision budget runs
///   out before convergence
/// - [`QuadratureError::NonFiniteIntegrand`] when `f` returns NaN or
///   infinity anywhere the rule samples it
///
/// # Examples
///
/// ```
/// use heston_core::math::quadrature::{integrate, QuadratureConfig};
///
/// let config = QuadratureConfig::default();
/// let value = integrate(|x| x * x, 0.0, 1.0, config).unwrap();
/// assert!((value - 1.0 / 3.0).abs() < 1e-9);
/// ```
pub fn integrate<F>(f: F, a: f64, b: f64, config: QuadratureConfig) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let eval = |x: f64| -> Result<f64, RefineError> {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(RefineError::NonFinite(x))
        }
    };

    let m = 0.5 * (a + b);
    let fa = eval(a).map_err(|e| finalize(e, config, a, b))?;
    let fm = eval(m).map_err(|e| finalize(e, config, a, b))?;
    let fb = eval(b).map_err(|e| finalize(e, config, a, b))?;
    let whole = simpson(b - a, fa, fm, fb);

    let mut budget = config.max_intervals;
    refine(&eval, a, b, fa, fm, fb, whole, config.tolerance, &mut budget)
        .map_err(|e| finalize(e, config, a, b))
}

fn finalize(err: RefineError, config: QuadratureConfig, a: f64, b: f64) -> QuadratureError {
    match err {
        RefineError::Budget => QuadratureError::BudgetExhausted {
            max_intervals: config.max_intervals,
            a,
            b,
        },
        RefineError::NonFinite(at) => QuadratureError::NonFiniteIntegrand { at },
    }
}

#[allow(clippy::too_many_arguments)]
fn refine<E>(
    eval: &E,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    budget: &mut usize,
) -> Result<f64, RefineError>
where
    E: Fn(f64) -> Result<f64, RefineError>,
{
    if *budget == 0 {
        return Err(RefineError::Budget);
    }
    *budget -= 1;

    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);

    let flm = eval(lm)?;
    let frm = eval(rm)?;

    let left = simpson(m - a, fa, flm, fm);
    let right = simpson(b - m, fm, frm, fb);
    let delta = left + right - whole;

    // Accept once the Richardson error estimate is inside the tolerance.
    // The interval can also shrink until the midpoints stop being distinct;
    // accept then too, the estimate cannot improve further.
    if delta.abs() <= 15.0 * tol || m - a <= f64::EPSILON * a.abs().max(1.0) {
        return Ok(left + right + delta / 15.0);
    }

    let half_tol = 0.5 * tol;
    let lv = refine(eval, a, m, fa, flm, fm, left, half_tol, budget)?;
    let rv = refine(eval, m, b, fm, frm, fb, right, half_tol, budget)?;
    Ok(lv + rv)
}
