//! # Heston Core
//!
//! Numerics foundation shared by the semi-analytic and Monte Carlo pricers:
//!
//! - Standard normal distribution functions (`math::distributions`)
//! - Bracketed root finding via Brent's method (`math::solvers`)
//! - Adaptive Simpson quadrature with a subdivision budget (`math::quadrature`)
//!
//! All routines are pure functions over their inputs; failures are reported
//! as structured error values, never panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
