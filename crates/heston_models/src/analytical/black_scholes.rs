//! Black-Scholes closed-form European option prices.
//!
//! **Call**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**:  P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! with d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T) and d₂ = d₁ - σ√T.
//!
//! These are free functions rather than a model struct: the
//! implied-volatility solver evaluates them at nonphysical (negative or
//! zero) volatilities while bracketing, so no constructor-time validation
//! would be meaningful. Callers own the inputs.

use heston_core::math::distributions::norm_cdf;

/// Maturities below this are priced at intrinsic value, avoiding division
/// by a near-zero `volatility * sqrt(maturity)`.
pub const MIN_MATURITY: f64 = 0.01;

/// d1 and d2 terms of the Black-Scholes formula.
#[inline]
fn d1_d2(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> (f64, f64) {
    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity)
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// European call price.
///
/// Maturities below [`MIN_MATURITY`] return the intrinsic value
/// `max(spot - strike, 0)`. The formula is evaluated as-is for any
/// volatility, including negative values passed during root bracketing.
///
/// # Examples
///
/// ```
/// use heston_models::analytical::call_price;
///
/// // Hull reference value: S=42, K=40, r=10%, sigma=20%, T=0.5 -> 4.76
/// let price = call_price(42.0, 40.0, 0.5, 0.1, 0.2);
/// assert!((price - 4.76).abs() < 0.01);
/// ```
pub fn call_price(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> f64 {
    if maturity < MIN_MATURITY {
        return (spot - strike).max(0.0);
    }
    let (d1, d2) = d1_d2(spot, strike, maturity, rate, volatility);
    spot * norm_cdf(d1) - strike * (-rate * maturity).exp() * norm_cdf(d2)
}

/// European put price.
///
/// Same degenerate-maturity policy as [`call_price`], returning
/// `max(strike - spot, 0)` below [`MIN_MATURITY`].
pub fn put_price(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> f64 {
    if maturity < MIN_MATURITY {
        return (strike - spot).max(0.0);
    }
    let (d1, d2) = d1_d2(spot, strike, maturity, rate, volatility);
    strike * (-rate * maturity).exp() * norm_cdf(-d2) - spot * norm_cdf(-d1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hull_reference_values() {
        // Hull, "Options, Futures and Other Derivatives": S=42, K=40,
        // r=10%, sigma=20%, T=0.5 -> call 4.76, put 0.81.
        assert_relative_eq!(call_price(42.0, 40.0, 0.5, 0.1, 0.2), 4.76, epsilon = 5e-3);
        assert_relative_eq!(put_price(42.0, 40.0, 0.5, 0.1, 0.2), 0.81, epsilon = 5e-3);
    }

    #[test]
    fn put_call_parity() {
        let (s, k, t, r, sigma) = (100.0, 95.0, 1.0, 0.05, 0.25);
        let lhs = call_price(s, k, t, r, sigma) - put_price(s, k, t, r, sigma);
        let rhs = s - k * (-r * t).exp();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-10);
    }

    #[test]
    fn degenerate_maturity_returns_intrinsic() {
        assert_relative_eq!(call_price(110.0, 100.0, 0.005, 0.05, 0.2), 10.0);
        assert_relative_eq!(call_price(90.0, 100.0, 0.005, 0.05, 0.2), 0.0);
        assert_relative_eq!(put_price(90.0, 100.0, 0.005, 0.05, 0.2), 10.0);
    }

    #[test]
    fn monotone_in_volatility() {
        let mut prev = call_price(100.0, 100.0, 1.0, 0.05, 0.05);
        for i in 1..20 {
            let sigma = 0.05 + 0.05 * i as f64;
            let cur = call_price(100.0, 100.0, 1.0, 0.05, sigma);
            assert!(cur > prev, "call price not increasing at sigma = {sigma}");
            prev = cur;
        }
    }

    #[test]
    fn negative_volatility_is_evaluable() {
        // The solver brackets over [-1, 1]; the formula must stay finite.
        let price = call_price(100.0, 100.0, 1.0, 0.05, -0.5);
        assert!(price.is_finite());
    }

    #[test]
    fn price_bounds() {
        let price = call_price(100.0, 100.0, 1.0, 0.05, 0.2);
        // Below spot, above discounted intrinsic forward value.
        assert!(price < 100.0);
        assert!(price > 100.0 - 100.0 * (-0.05_f64).exp());
    }
}
