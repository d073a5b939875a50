//! Implied-volatility inversion.
//!
//! Recovers the Black-Scholes volatility that reproduces a target call
//! price by bracketed root finding over the fixed interval `[-1, 1]`. The
//! wide bracket deliberately admits nonphysical negative volatilities: the
//! formula is analytic there, and including them makes the sign change
//! straddle the root in practice. When the endpoints do not straddle a root
//! the failure is reported, never silently defaulted or widened — a price
//! outside the band reachable from this bracket is usually
//! arbitrage-inconsistent input, and widening would mask that.

use heston_core::math::solvers::{BrentSolver, SolverConfig, SolverError};
use thiserror::Error;

use super::black_scholes::call_price;

/// Fixed search bracket for the volatility root.
const BRACKET: (f64, f64) = (-1.0, 1.0);

/// Errors from implied-volatility inversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImpliedVolError {
    /// The pricing residual has the same sign at both ends of `[-1, 1]`,
    /// so no root is bracketed. Carries the contract maturity for
    /// diagnostics (short maturities are the usual culprit).
    #[error("implied volatility not bracketed in [-1, 1] for maturity {maturity}")]
    NotBracketed {
        /// Maturity of the contract whose inversion failed.
        maturity: f64,
    },

    /// The root finder exhausted its iteration budget.
    #[error("implied volatility solve did not converge within {iterations} iterations")]
    NoConvergence {
        /// Iteration budget that was exhausted.
        iterations: usize,
    },
}

/// Inverts the Black-Scholes call price to a volatility.
///
/// Finds the root of `f(x) = call_price(spot, strike, maturity, rate, x) -
/// target_price` over `[-1, 1]` with Brent's method at 1e-8 tolerance.
///
/// # Errors
///
/// [`ImpliedVolError::NotBracketed`] when `f(-1)` and `f(1)` share a sign.
/// The caller decides whether to skip the point (a surface grid cell is
/// left undefined) or reject the input.
///
/// # Examples
///
/// ```
/// use heston_models::analytical::{call_price, implied_volatility};
///
/// let price = call_price(100.0, 105.0, 1.0, 0.03, 0.25);
/// let vol = implied_volatility(100.0, 105.0, 1.0, 0.03, price).unwrap();
/// assert!((vol - 0.25).abs() < 1e-6);
/// ```
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    target_price: f64,
) -> Result<f64, ImpliedVolError> {
    let residual = |x: f64| call_price(spot, strike, maturity, rate, x) - target_price;

    let (lo, hi) = BRACKET;
    if residual(lo) * residual(hi) > 0.0 {
        return Err(ImpliedVolError::NotBracketed { maturity });
    }

    let solver = BrentSolver::new(SolverConfig::new(1e-8, 100));
    solver.find_root(residual, lo, hi).map_err(|err| match err {
        SolverError::NoBracket { .. } => ImpliedVolError::NotBracketed { maturity },
        SolverError::MaxIterationsExceeded { iterations } => {
            ImpliedVolError::NoConvergence { iterations }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn round_trip_recovers_volatility() {
        for &sigma in &[0.08, 0.15, 0.25, 0.4, 0.6] {
            let price = call_price(100.0, 100.0, 1.0, 0.05, sigma);
            let vol = implied_volatility(100.0, 100.0, 1.0, 0.05, price).unwrap();
            assert_relative_eq!(vol, sigma, epsilon = 1e-6);
        }
    }

    #[test]
    fn round_trip_off_the_money() {
        let cases = [(80.0, 0.5), (95.0, 0.25), (120.0, 2.0)];
        for &(strike, maturity) in &cases {
            let price = call_price(100.0, strike, maturity, 0.03, 0.3);
            let vol = implied_volatility(100.0, strike, maturity, 0.03, price).unwrap();
            assert_relative_eq!(vol, 0.3, epsilon = 1e-6);
        }
    }

    #[test]
    fn unbracketable_price_reported() {
        // A target above the spot exceeds any call value the bracket can
        // reach: both residual endpoints are negative.
        let result = implied_volatility(100.0, 100.0, 1.0, 0.05, 150.0);
        assert_eq!(
            result,
            Err(ImpliedVolError::NotBracketed { maturity: 1.0 })
        );
    }

    #[test]
    fn failure_carries_maturity() {
        let result = implied_volatility(100.0, 100.0, 0.25, 0.05, 150.0);
        match result {
            Err(ImpliedVolError::NotBracketed { maturity }) => {
                assert_relative_eq!(maturity, 0.25)
            }
            other => panic!("expected NotBracketed, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        // Domain restricted to cells with non-negligible vega; outside it
        // the price is flat in volatility and no inversion is meaningful.
        fn round_trip_property(
            sigma in 0.1_f64..0.6,
            strike in 80.0_f64..120.0,
            maturity in 0.25_f64..3.0,
        ) {
            let price = call_price(100.0, strike, maturity, 0.03, sigma);
            let vol = implied_volatility(100.0, strike, maturity, 0.03, price).unwrap();
            prop_assert!((vol - sigma).abs() < 1e-5);
        }
    }
}
