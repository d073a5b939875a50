//! Path simulation and payoff aggregation.
//!
//! Paths are split into fixed-size chunks processed in parallel with rayon.
//! Chunk `k` owns a private RNG stream seeded from `(base seed, k)`, and the
//! per-chunk partial sums are folded in chunk order afterwards, so a given
//! seed yields the same result whatever the worker-thread count. Per-run
//! floating-point reordering relative to a sequential sweep stays at the
//! ULP level of the chunk fold.

use rayon::prelude::*;

use heston_models::params::{EuropeanCall, HestonParams, Market};

use super::config::McConfig;
use super::error::{ConfigError, McError};
use super::scheme::VarianceScheme;
use crate::rng::SimRng;

/// Paths per parallel work unit. Fixed (not derived from the thread count)
/// so that chunk seeding, and therefore the result, is reproducible.
const CHUNK_PATHS: usize = 4096;

/// Monte Carlo pricing result.
///
/// Immutable; produced once per [`McPricer::simulate`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McResult {
    /// Mean discounted payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Lower 2-standard-error confidence bound.
    pub conf_low: f64,
    /// Upper 2-standard-error confidence bound.
    pub conf_high: f64,
    /// Fraction of (step, path) observations whose raw variance update was
    /// negative before the scheme's correction. Inspect this when the
    /// Feller condition is violated.
    pub negative_variance_fraction: f64,
}

impl McResult {
    /// Whether `value` lies inside the confidence interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.conf_low <= value && value <= self.conf_high
    }
}

/// Partial statistics from one chunk of paths.
#[derive(Clone, Copy, Default)]
struct ChunkStats {
    paths: usize,
    sum: f64,
    sum_sq: f64,
    negatives: u64,
}

/// Monte Carlo pricer for European calls under Heston dynamics.
///
/// # Examples
///
/// ```
/// use heston_models::params::{EuropeanCall, HestonParams, Market};
/// use heston_pricing::mc::{McConfig, McPricer, VarianceScheme};
///
/// let params = HestonParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
/// let market = Market::new(100.0, 0.03).unwrap();
/// let contract = EuropeanCall::new(100.0, 1.0).unwrap();
///
/// let config = McConfig::builder()
///     .n_paths(10_000)
///     .n_steps(100)
///     .scheme(VarianceScheme::ReflectionMilstein)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let result = McPricer::new(config).unwrap()
///     .simulate(&params, &market, &contract)
///     .unwrap();
/// assert!(result.conf_low < result.price && result.price < result.conf_high);
/// ```
pub struct McPricer {
    config: McConfig,
}

impl McPricer {
    /// Creates a pricer with a validated configuration.
    pub fn new(config: McConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the simulation configuration.
    pub fn config(&self) -> &McConfig {
        &self.config
    }

    /// Prices the contract by simulating coupled spot/variance paths.
    ///
    /// Per step and path: draw two independent standard normals, correlate
    /// the second as `Z2' = rho*Z1 + sqrt(1 - rho^2)*Z2`, advance the spot
    /// by exact-in-variance log-Euler with the pre-step variance, then
    /// advance the variance with the selected scheme.
    ///
    /// # Errors
    ///
    /// [`McError::InvalidInput`] if the model, market or contract inputs
    /// fail validation. Validation runs before any paths are generated.
    pub fn simulate(
        &self,
        params: &HestonParams,
        market: &Market,
        contract: &EuropeanCall,
    ) -> Result<McResult, McError> {
        params.validate()?;
        market.validate()?;
        contract.validate()?;

        let scheme = self.config.scheme().effective(params);
        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let seed = self.config.seed().unwrap_or(0);

        let dt = contract.maturity / n_steps as f64;
        let discount = (-market.rate * contract.maturity).exp();

        let n_chunks = n_paths.div_ceil(CHUNK_PATHS);
        let partials: Vec<ChunkStats> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let chunk_paths = CHUNK_PATHS.min(n_paths - chunk * CHUNK_PATHS);
                simulate_chunk(
                    chunk_seed(seed, chunk as u64),
                    chunk_paths,
                    n_steps,
                    dt,
                    discount,
                    scheme,
                    params,
                    market,
                    contract,
                )
            })
            .collect();

        // Fold in chunk order: the total is independent of thread count.
        let mut total = ChunkStats::default();
        for stats in partials {
            total.paths += stats.paths;
            total.sum += stats.sum;
            total.sum_sq += stats.sum_sq;
            total.negatives += stats.negatives;
        }

        let n = total.paths as f64;
        let price = total.sum / n;
        let variance = if total.paths > 1 {
            ((total.sum_sq - total.sum * total.sum / n) / (n - 1.0)).max(0.0)
        } else {
            0.0
        };
        let std_error = (variance / n).sqrt();

        Ok(McResult {
            price,
            std_error,
            conf_low: price - 2.0 * std_error,
            conf_high: price + 2.0 * std_error,
            negative_variance_fraction: total.negatives as f64 / (n_steps as f64 * n),
        })
    }
}

/// Derives the RNG seed for one chunk (splitmix64 finaliser over the base
/// seed and chunk index).
#[inline]
fn chunk_seed(base: u64, index: u64) -> u64 {
    let mut z = base ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulates one chunk of paths to maturity and accumulates payoff sums.
///
/// The spot/variance state is private to this call and dropped on return.
#[allow(clippy::too_many_arguments)]
fn simulate_chunk(
    seed: u64,
    n_paths: usize,
    n_steps: usize,
    dt: f64,
    discount: f64,
    scheme: VarianceScheme,
    params: &HestonParams,
    market: &Market,
    contract: &EuropeanCall,
) -> ChunkStats {
    let mut rng = SimRng::from_seed(seed);

    let mut spots = vec![market.spot; n_paths];
    let mut variances = vec![params.v0; n_paths];
    let mut z_spot = vec![0.0; n_paths];
    let mut z_var = vec![0.0; n_paths];

    let rho = params.rho;
    let rho_bar = (1.0 - rho * rho).sqrt();
    let mut negatives = 0u64;

    for _ in 0..n_steps {
        rng.fill_normal(&mut z_spot);
        rng.fill_normal(&mut z_var);

        for p in 0..n_paths {
            let z1 = z_spot[p];
            let z2 = rho * z1 + rho_bar * z_var[p];

            // Pre-step variance drives the spot; Alfonsi may have left it
            // negative, so the square root is guarded.
            let v = variances[p].max(0.0);
            spots[p] *= ((market.rate - 0.5 * v) * dt + (v * dt).sqrt() * z1).exp();

            let (next_v, was_negative) = scheme.step(variances[p], dt, z2, params);
            variances[p] = next_v;
            negatives += was_negative as u64;
        }
    }

    let mut stats = ChunkStats {
        paths: n_paths,
        negatives,
        ..ChunkStats::default()
    };
    for &terminal in &spots {
        let payoff = discount * contract.payoff(terminal);
        stats.sum += payoff;
        stats.sum_sq += payoff * payoff;
    }
    stats
}
