//! Variance-discretisation schemes.
//!
//! The square-root variance process can step below zero under any Euler
//! style discretisation; each scheme pairs a raw update with a policy for
//! negative values. The returned flag records whether the raw update was
//! negative before correction — the simulator aggregates it into the
//! `negative_variance_fraction` diagnostic.

use heston_models::params::HestonParams;

/// Interchangeable one-step variance update policies.
///
/// | Scheme | Raw update | Negative policy |
/// |---|---|---|
/// | `Absorption` | Euler | clamp to 0 |
/// | `Reflection` | Euler | replace with `-v` |
/// | `ReflectionMilstein` | Milstein | replace with `-v` |
/// | `Alfonsi` | drift-implicit style | none (downstream `sqrt` guarded) |
///
/// A scheme is a per-run configuration chosen once per simulation call,
/// never per-path state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarianceScheme {
    /// Euler step; negative values absorbed at zero.
    #[default]
    Absorption,
    /// Euler step; negative values reflected to `-v`.
    Reflection,
    /// Milstein step (higher-order in vol-of-vol); negative values
    /// reflected.
    ReflectionMilstein,
    /// Alfonsi step; no correction applied, the variance may go negative
    /// and every downstream square root must be guarded.
    Alfonsi,
}

impl VarianceScheme {
    /// Resolves the scheme actually used for the given parameters.
    ///
    /// Alfonsi assumes the Feller condition; when the parameters violate
    /// it the engine deterministically downgrades to
    /// [`VarianceScheme::ReflectionMilstein`] and emits a warning. All
    /// other schemes are used as requested.
    pub fn effective(self, params: &HestonParams) -> VarianceScheme {
        if self == VarianceScheme::Alfonsi && !params.satisfies_feller() {
            tracing::warn!(
                feller_ratio = params.feller_ratio(),
                "Alfonsi scheme requested under Feller-violating parameters; \
                 falling back to ReflectionMilstein"
            );
            VarianceScheme::ReflectionMilstein
        } else {
            self
        }
    }

    /// Advances the variance one step of size `dt` using the correlated
    /// normal draw `z`.
    ///
    /// Returns the corrected next variance and whether the raw update was
    /// negative before correction. The incoming `v` is non-negative for
    /// every scheme except Alfonsi, whose square root is guarded.
    #[inline]
    pub(crate) fn step(self, v: f64, dt: f64, z: f64, params: &HestonParams) -> (f64, bool) {
        let kappa = params.kappa;
        let theta = params.theta;
        let xi = params.xi;

        match self {
            VarianceScheme::Absorption => {
                let raw = v + kappa * (theta - v) * dt + xi * (v * dt).sqrt() * z;
                if raw < 0.0 {
                    (0.0, true)
                } else {
                    (raw, false)
                }
            }
            VarianceScheme::Reflection => {
                let raw = v + kappa * (theta - v) * dt + xi * (v * dt).sqrt() * z;
                if raw < 0.0 {
                    (-raw, true)
                } else {
                    (raw, false)
                }
            }
            VarianceScheme::ReflectionMilstein => {
                let sq = v.sqrt() + 0.5 * xi * dt.sqrt() * z;
                let raw = sq * sq - kappa * (v - theta) * dt - 0.25 * xi * xi * dt;
                if raw < 0.0 {
                    (-raw, true)
                } else {
                    (raw, false)
                }
            }
            VarianceScheme::Alfonsi => {
                let raw = v - kappa * (v - theta) * dt + xi * (v.max(0.0) * dt).sqrt() * z
                    - 0.5 * xi * xi * dt;
                (raw, raw < 0.0)
            }
        }
    }
}
