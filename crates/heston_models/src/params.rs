//! Model, market and contract value types.
//!
//! The pricers take three immutable records: [`HestonParams`] for the
//! variance-process dynamics, [`Market`] for the spot/rate environment and
//! [`EuropeanCall`] for the contract. Passing them explicitly (rather than
//! through shared globals) keeps every pricing call self-contained and lets
//! the Monte Carlo engine partition paths across threads safely.

use thiserror::Error;

/// Validation errors for model, market and contract inputs.
///
/// Every variant carries the offending value. Validation runs before any
/// pricing or simulation work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HestonError {
    /// Mean-reversion speed must be positive.
    #[error("invalid mean-reversion speed: kappa = {0} (must be positive)")]
    InvalidKappa(f64),

    /// Long-run variance must be positive.
    #[error("invalid long-run variance: theta = {0} (must be positive)")]
    InvalidTheta(f64),

    /// Vol-of-vol must be positive.
    #[error("invalid vol-of-vol: xi = {0} (must be positive)")]
    InvalidXi(f64),

    /// Correlation must lie in [-1, 1].
    #[error("invalid correlation: rho = {0} (must be in [-1, 1])")]
    InvalidRho(f64),

    /// Initial variance must be non-negative.
    #[error("invalid initial variance: v0 = {0} (must be non-negative)")]
    InvalidV0(f64),

    /// Spot price must be positive.
    #[error("invalid spot price: S0 = {0} (must be positive)")]
    InvalidSpot(f64),

    /// Strike must be positive.
    #[error("invalid strike: K = {0} (must be positive)")]
    InvalidStrike(f64),

    /// Maturity must be positive.
    #[error("invalid maturity: T = {0} (must be positive, in years)")]
    InvalidMaturity(f64),
}

/// Heston variance-process parameters.
///
/// # Fields
///
/// * `kappa` - mean-reversion speed (> 0)
/// * `theta` - long-run variance (> 0)
/// * `xi` - vol-of-vol (> 0)
/// * `rho` - correlation between the asset and variance drivers ([-1, 1])
/// * `v0` - initial variance (>= 0)
///
/// # Examples
///
/// ```
/// use heston_models::params::HestonParams;
///
/// let params = HestonParams::new(1.5, 0.04, 0.3, -0.7, 0.04).unwrap();
/// assert!(params.satisfies_feller());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Mean-reversion speed (kappa).
    pub kappa: f64,
    /// Long-run variance (theta).
    pub theta: f64,
    /// Vol-of-vol (xi).
    pub xi: f64,
    /// Asset/variance correlation (rho).
    pub rho: f64,
    /// Initial variance (v0).
    pub v0: f64,
}

impl HestonParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns the matching [`HestonError`] variant for the first invalid
    /// field.
    pub fn new(kappa: f64, theta: f64, xi: f64, rho: f64, v0: f64) -> Result<Self, HestonError> {
        let params = Self {
            kappa,
            theta,
            xi,
            rho,
            v0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates all fields.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !(self.kappa > 0.0) || !self.kappa.is_finite() {
            return Err(HestonError::InvalidKappa(self.kappa));
        }
        if !(self.theta > 0.0) || !self.theta.is_finite() {
            return Err(HestonError::InvalidTheta(self.theta));
        }
        if !(self.xi > 0.0) || !self.xi.is_finite() {
            return Err(HestonError::InvalidXi(self.xi));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonError::InvalidRho(self.rho));
        }
        if !(self.v0 >= 0.0) || !self.v0.is_finite() {
            return Err(HestonError::InvalidV0(self.v0));
        }
        Ok(())
    }

    /// Checks the Feller condition `2 * kappa * theta >= xi^2`.
    ///
    /// When it holds, the continuous-time variance process cannot reach
    /// zero. Discretisation schemes that assume positivity are downgraded
    /// when it fails; see the Monte Carlo scheme documentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use heston_models::params::HestonParams;
    ///
    /// // 2 * 1.5 * 0.04 = 0.12 >= 0.3^2 = 0.09
    /// let ok = HestonParams::new(1.5, 0.04, 0.3, -0.7, 0.04).unwrap();
    /// assert!(ok.satisfies_feller());
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 2.0^2 = 4.0
    /// let violating = HestonParams::new(0.5, 0.04, 2.0, -0.7, 0.04).unwrap();
    /// assert!(!violating.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.xi * self.xi
    }

    /// Feller ratio `2 * kappa * theta / xi^2`; values >= 1 satisfy the
    /// condition.
    pub fn feller_ratio(&self) -> f64 {
        2.0 * self.kappa * self.theta / (self.xi * self.xi)
    }
}

/// Market environment: spot and the (continuously compounded) risk-free
/// rate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Market {
    /// Spot price (S0).
    pub spot: f64,
    /// Risk-free rate (r).
    pub rate: f64,
}

impl Market {
    /// Creates a validated market environment.
    ///
    /// # Errors
    ///
    /// [`HestonError::InvalidSpot`] if the spot is not strictly positive.
    pub fn new(spot: f64, rate: f64) -> Result<Self, HestonError> {
        let market = Self { spot, rate };
        market.validate()?;
        Ok(market)
    }

    /// Validates all fields.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !(self.spot > 0.0) || !self.spot.is_finite() {
            return Err(HestonError::InvalidSpot(self.spot));
        }
        Ok(())
    }

    /// Forward price `S0 * exp(r * tau)` for the given maturity.
    #[inline]
    pub fn forward(&self, maturity: f64) -> f64 {
        self.spot * (self.rate * maturity).exp()
    }
}

/// European call contract: strike and time to maturity in years.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanCall {
    /// Strike price (K).
    pub strike: f64,
    /// Time to maturity (T), in years.
    pub maturity: f64,
}

impl EuropeanCall {
    /// Creates a validated contract.
    ///
    /// # Errors
    ///
    /// [`HestonError::InvalidStrike`] or [`HestonError::InvalidMaturity`]
    /// for non-positive inputs.
    pub fn new(strike: f64, maturity: f64) -> Result<Self, HestonError> {
        let contract = Self { strike, maturity };
        contract.validate()?;
        Ok(contract)
    }

    /// Validates all fields.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !(self.strike > 0.0) || !self.strike.is_finite() {
            return Err(HestonError::InvalidStrike(self.strike));
        }
        if !(self.maturity > 0.0) || !self.maturity.is_finite() {
            return Err(HestonError::InvalidMaturity(self.maturity));
        }
        Ok(())
    }

    /// Call payoff `max(S - K, 0)` at the given terminal spot.
    #[inline]
    pub fn payoff(&self, terminal_spot: f64) -> f64 {
        (terminal_spot - self.strike).max(0.0)
    }
}
