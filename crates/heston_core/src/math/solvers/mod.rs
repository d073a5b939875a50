//! Root-finding solvers.

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;

use thiserror::Error;

/// Errors from bracketed root finding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The function has the same sign at both bracket endpoints, so no
    /// root is guaranteed to lie inside.
    #[error("no root bracketed in [{a}, {b}]: f has the same sign at both endpoints")]
    NoBracket {
        /// Left bracket endpoint.
        a: f64,
        /// Right bracket endpoint.
        b: f64,
    },

    /// The solver exhausted its iteration budget without converging.
    #[error("root finding did not converge within {iterations} iterations")]
    MaxIterationsExceeded {
        /// The iteration budget that was exhausted.
        iterations: usize,
    },
}
