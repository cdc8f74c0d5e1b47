//! # bs-engine: Closed-Form Black-Scholes Analytics
//!
//! A Rust library for pricing European options under the Black-Scholes model,
//! computing their Greeks, estimating historical volatility and generating
//! sensitivity grids for charting.
//!
//! ## Key Features
//!
//! - **Closed-form pricing**: call and put prices with their d₁/d₂
//! - **Complete Greeks**: Delta, Gamma, Vega, Theta, Rho in trading-desk units
//! - **Historical volatility**: annualized sample std-dev of log returns
//! - **Sensitivity grids**: 1D curves and 2D surfaces, evaluated in parallel with Rayon
//! - **Typed failures**: invalid input is reported, never turned into NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_engine::analytics::bs_analytic::{evaluate, price};
//! use bs_engine::models::{OptionParameters, OptionType};
//!
//! let params = OptionParameters::new(
//!     100.0, // Spot price
//!     100.0, // Strike
//!     1.0,   // Time to expiry (years)
//!     0.05,  // Risk-free rate
//!     0.2,   // Volatility
//!     OptionType::Call,
//! )
//! .expect("valid parameters");
//!
//! let result = price(&params).expect("priceable");
//! assert!((result.price - 10.4506).abs() < 1e-4);
//!
//! let greeks = evaluate(&params).expect("priceable").greeks;
//! println!("delta {:.4}, theta/day {:.5}", greeks.delta, greeks.theta);
//! ```
//!
//! ## Statelessness
//!
//! Every function is a pure function of its arguments. Nothing is cached
//! between calls, so all entry points may be called concurrently.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod models;
pub mod analytics;
pub mod sweep;
pub mod expiry;
pub mod payoff;
pub mod position;
pub mod config;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::bs_analytic::{evaluate, greeks, price, Evaluation, Greek, GreeksResult, PricingResult};
pub use analytics::volatility::{historical_volatility, VolatilityEstimate, TRADING_DAYS_PER_YEAR};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use models::{OptionParameters, OptionType};
pub use sweep::{sweep, SensitivityGrid, SweepField, SweepRange, SweepSpec};
