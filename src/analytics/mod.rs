// src/analytics/mod.rs
pub mod bs_analytic;
pub mod volatility;

pub use bs_analytic::{evaluate, greeks, price, Evaluation, Greek, GreeksResult, PricingResult};
pub use volatility::{historical_volatility, VolatilityEstimate, TRADING_DAYS_PER_YEAR};
