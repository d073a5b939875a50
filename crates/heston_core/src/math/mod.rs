//! Mathematical routines: distributions, root finding, quadrature.

pub mod distributions;
pub mod quadrature;
pub mod solvers;
