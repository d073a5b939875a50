//! Implied-volatility surface construction.
//!
//! Sweeps a strike/maturity grid, prices each cell with the semi-analytic
//! characteristic-function pricer and inverts the price to a Black-Scholes
//! implied volatility. Cells whose pricing or inversion fails are skipped
//! with a debug log rather than aborting the sweep, so one pathological
//! corner of the grid never costs the rest of the surface.

use heston_models::analytical::implied_volatility;
use heston_models::params::{EuropeanCall, HestonError, HestonParams, Market};
use heston_models::semi_analytic;
use thiserror::Error;

/// Errors from surface construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The strike or maturity axis is empty.
    #[error("surface grid is empty: {strikes} strikes x {maturities} maturities")]
    EmptyGrid {
        /// Number of strikes supplied.
        strikes: usize,
        /// Number of maturities supplied.
        maturities: usize,
    },

    /// Model or market inputs failed validation.
    #[error(transparent)]
    InvalidInput(#[from] HestonError),
}

/// One successfully inverted surface cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolPoint {
    /// Time to expiry, in years.
    pub expiry: f64,
    /// Forward moneyness `K / F(expiry)`.
    pub moneyness: f64,
    /// Black-Scholes implied volatility recovered for the cell.
    pub vol: f64,
}

/// Builds an implied-volatility surface from Heston parameters.
///
/// # Examples
///
/// ```
/// use heston_models::params::{HestonParams, Market};
/// use heston_pricing::surface::SurfaceBuilder;
///
/// let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
/// let market = Market::new(100.0, 0.03).unwrap();
///
/// let builder = SurfaceBuilder::new(vec![90.0, 100.0, 110.0], vec![0.5, 1.0]);
/// let surface = builder.build(&params, &market).unwrap();
/// assert_eq!(surface.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct SurfaceBuilder {
    strikes: Vec<f64>,
    maturities: Vec<f64>,
}

impl SurfaceBuilder {
    /// Creates a builder over the given strike and maturity axes.
    pub fn new(strikes: Vec<f64>, maturities: Vec<f64>) -> Self {
        Self {
            strikes,
            maturities,
        }
    }

    /// Prices and inverts every grid cell, maturity-major.
    ///
    /// Returns the points that inverted successfully; failed cells are
    /// logged at debug level and skipped. The result can therefore hold
    /// fewer than `strikes * maturities` points.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::EmptyGrid`] when either axis is empty, or
    /// [`SurfaceError::InvalidInput`] when the model or market inputs fail
    /// validation. Per-cell failures are not errors.
    pub fn build(
        &self,
        params: &HestonParams,
        market: &Market,
    ) -> Result<Vec<VolPoint>, SurfaceError> {
        if self.strikes.is_empty() || self.maturities.is_empty() {
            return Err(SurfaceError::EmptyGrid {
                strikes: self.strikes.len(),
                maturities: self.maturities.len(),
            });
        }
        params.validate()?;
        market.validate()?;

        let mut points = Vec::with_capacity(self.strikes.len() * self.maturities.len());
        for &maturity in &self.maturities {
            let forward = market.forward(maturity);
            for &strike in &self.strikes {
                match invert_cell(params, market, strike, maturity) {
                    Ok(vol) => points.push(VolPoint {
                        expiry: maturity,
                        moneyness: strike / forward,
                        vol,
                    }),
                    Err(reason) => {
                        tracing::debug!(strike, maturity, %reason, "skipping surface cell");
                    }
                }
            }
        }
        Ok(points)
    }
}

/// Prices one cell semi-analytically and inverts to an implied vol.
fn invert_cell(
    params: &HestonParams,
    market: &Market,
    strike: f64,
    maturity: f64,
) -> Result<f64, CellError> {
    let contract = EuropeanCall::new(strike, maturity)?;
    let price = semi_analytic::call_price(params, market, &contract)?;
    let vol = implied_volatility(market.spot, strike, maturity, market.rate, price)?;
    Ok(vol)
}

/// Per-cell failure; only ever logged, never propagated out of the sweep.
#[derive(Debug, Error)]
enum CellError {
    #[error(transparent)]
    Contract(#[from] HestonError),
    #[error(transparent)]
    Pricing(#[from] semi_analytic::SemiAnalyticError),
    #[error(transparent)]
    Inversion(#[from] heston_models::analytical::ImpliedVolError),
}
