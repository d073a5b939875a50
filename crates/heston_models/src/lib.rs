//! # Heston Models
//!
//! Model and contract value types plus the analytic pricing layer:
//!
//! - [`params`]: immutable [`HestonParams`](params::HestonParams) /
//!   [`Market`](params::Market) / [`EuropeanCall`](params::EuropeanCall)
//!   value types with fail-fast validation and Feller-condition helpers
//! - [`analytical`]: the Black-Scholes closed form and the
//!   implied-volatility inversion built on it
//! - [`semi_analytic`]: the characteristic-function Heston call pricer
//!
//! The model is the stochastic-volatility SDE pair
//!
//! ```text
//! dS = r * S * dt + sqrt(v) * S * dW_S
//! dv = kappa * (theta - v) * dt + xi * sqrt(v) * dW_v
//! E[dW_S * dW_v] = rho * dt
//! ```
//!
//! All pricing operations take the value types explicitly and return
//! structured `Result`s; nothing in this crate holds mutable state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod params;
pub mod semi_analytic;
