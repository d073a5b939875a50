//! Black-Scholes closed form and implied-volatility inversion.

mod black_scholes;
mod implied_vol;

pub use black_scholes::{call_price, put_price, MIN_MATURITY};
pub use implied_vol::{implied_volatility, ImpliedVolError};
