//! Simulation configuration.

use super::error::ConfigError;
use super::scheme::VarianceScheme;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable; construct through [`McConfig::builder`]. Created per
/// simulation call — the engine holds no persistent state between calls.
///
/// # Examples
///
/// ```
/// use heston_pricing::mc::{McConfig, VarianceScheme};
///
/// let config = McConfig::builder()
///     .n_paths(10_000)
///     .n_steps(250)
///     .scheme(VarianceScheme::ReflectionMilstein)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 10_000);
/// ```
#[derive(Clone, Debug)]
pub struct McConfig {
    n_paths: usize,
    n_steps: usize,
    scheme: VarianceScheme,
    seed: Option<u64>,
}

impl McConfig {
    /// Creates a configuration builder.
    #[inline]
    pub fn builder() -> McConfigBuilder {
        McConfigBuilder::default()
    }

    /// Number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Requested variance-discretisation scheme.
    ///
    /// The simulator may downgrade Alfonsi to ReflectionMilstein when the
    /// Feller condition fails; see
    /// [`VarianceScheme::effective`](super::VarianceScheme::effective).
    #[inline]
    pub fn scheme(&self) -> VarianceScheme {
        self.scheme
    }

    /// Seed for reproducible path generation, if set.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates path and step counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`McConfig`].
#[derive(Clone, Debug, Default)]
pub struct McConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    scheme: VarianceScheme,
    seed: Option<u64>,
}

impl McConfigBuilder {
    /// Sets the number of simulation paths (in `[1, MAX_PATHS]`).
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path (in `[1, MAX_STEPS]`).
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the variance-discretisation scheme (default: Absorption).
    #[inline]
    pub fn scheme(mut self, scheme: VarianceScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the RNG seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingField`] if a count was not set, or the
    /// matching range error if one is out of bounds.
    pub fn build(self) -> Result<McConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::MissingField("n_paths"))?;
        let n_steps = self.n_steps.ok_or(ConfigError::MissingField("n_steps"))?;

        let config = McConfig {
            n_paths,
            n_steps,
            scheme: self.scheme,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_valid() {
        let config = McConfig::builder()
            .n_paths(3000)
            .n_steps(2000)
            .scheme(VarianceScheme::Alfonsi)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(config.n_paths(), 3000);
        assert_eq!(config.n_steps(), 2000);
        assert_eq!(config.scheme(), VarianceScheme::Alfonsi);
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn default_scheme_is_absorption() {
        let config = McConfig::builder().n_paths(10).n_steps(10).build().unwrap();
        assert_eq!(config.scheme(), VarianceScheme::Absorption);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn zero_counts_rejected() {
        assert!(matches!(
            McConfig::builder().n_paths(0).n_steps(10).build(),
            Err(ConfigError::InvalidPathCount(0))
        ));
        assert!(matches!(
            McConfig::builder().n_paths(10).n_steps(0).build(),
            Err(ConfigError::InvalidStepCount(0))
        ));
    }

    #[test]
    fn oversized_counts_rejected() {
        assert!(matches!(
            McConfig::builder()
                .n_paths(MAX_PATHS + 1)
                .n_steps(10)
                .build(),
            Err(ConfigError::InvalidPathCount(_))
        ));
        assert!(matches!(
            McConfig::builder()
                .n_paths(10)
                .n_steps(MAX_STEPS + 1)
                .build(),
            Err(ConfigError::InvalidStepCount(_))
        ));
    }

    #[test]
    fn missing_fields_rejected() {
        assert!(matches!(
            McConfig::builder().n_steps(10).build(),
            Err(ConfigError::MissingField("n_paths"))
        ));
        assert!(matches!(
            McConfig::builder().n_paths(10).build(),
            Err(ConfigError::MissingField("n_steps"))
        ));
    }
}
