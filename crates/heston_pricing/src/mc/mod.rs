//! Monte Carlo pricing of European calls under Heston dynamics.
//!
//! The engine advances coupled spot/variance paths over a uniform time
//! grid: the log-spot moves by exact-in-variance Euler using the pre-step
//! variance, and the variance is advanced by one of four interchangeable
//! discretisation schemes ([`VarianceScheme`]). The scheme is selected once
//! per simulation call, not re-dispatched per path.

mod config;
mod error;
mod scheme;
mod simulator;

pub use config::{McConfig, McConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use error::{ConfigError, McError};
pub use scheme::VarianceScheme;
pub use simulator::{McPricer, McResult};
