//! # Heston Pricing
//!
//! Monte Carlo engine for the Heston model plus the volatility-surface
//! builder that consumes the semi-analytic layer:
//!
//! - [`rng`]: seeded, reproducible random number generation
//! - [`mc`]: simulation configuration, the four variance-discretisation
//!   schemes and the path simulator
//! - [`surface`]: implied-volatility surface construction
//!
//! Paths are embarrassingly parallel: the simulator partitions them into
//! fixed-size chunks processed with rayon, each chunk owning a private RNG
//! stream derived from the base seed and chunk index, and folds the partial
//! sums in chunk order. Results therefore depend only on the seed, never on
//! the worker-thread count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
pub mod surface;
