// src/analytics/volatility.rs
//! Historical (realized) volatility from a closing-price series.
//!
//! ```text
//! r_i = ln(P_i / P_{i-1})
//! σ_annual = stdev(r) * √periods_per_year      (n-1 denominator)
//! ```
//!
//! The estimate is advisory: a caller may prefer a market implied volatility.

use crate::error::{validation::*, EngineError, EngineResult};
use statrs::statistics::Statistics;

/// Conventional number of trading days per year
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Annualized volatility and the sample it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimate {
    /// Annualized standard deviation of log returns
    pub annualized: f64,
    /// Per-period (un-annualized) standard deviation
    pub periodic: f64,
    /// Number of log returns in the sample
    pub observations: usize,
    pub periods_per_year: u32,
}

/// Annualized historical volatility of a price series.
///
/// # Errors
/// - `InsufficientData` for fewer than two prices. A single return has no
///   sample variance, so two prices are also rejected (see DESIGN.md).
/// - `InvalidParameter` if any price is not finite and positive, or
///   `trading_periods_per_year` is zero.
/// - `NumericalInstability` if a price ratio overflows to a non-finite return.
pub fn historical_volatility(
    prices: &[f64],
    trading_periods_per_year: u32,
) -> EngineResult<VolatilityEstimate> {
    if prices.len() < 2 {
        return Err(EngineError::InsufficientData {
            required: 2,
            actual: prices.len(),
        });
    }
    validate_periods(trading_periods_per_year)?;
    let returns = log_returns(prices)?;
    estimate(&returns, trading_periods_per_year)
}

/// Volatility over the most recent `window` returns only.
///
/// Needs at least `window + 1` prices.
pub fn trailing_volatility(
    prices: &[f64],
    window: usize,
    trading_periods_per_year: u32,
) -> EngineResult<VolatilityEstimate> {
    let required = required_prices(prices, window)?;
    historical_volatility(&prices[prices.len() - required..], trading_periods_per_year)
}

/// Annualized volatility for every full `window` of returns, oldest first.
pub fn rolling_volatility(
    prices: &[f64],
    window: usize,
    trading_periods_per_year: u32,
) -> EngineResult<Vec<f64>> {
    validate_periods(trading_periods_per_year)?;
    required_prices(prices, window)?;
    let returns = log_returns(prices)?;
    let annualizer = (trading_periods_per_year as f64).sqrt();
    let series = returns
        .windows(window)
        .map(|w| {
            let periodic = finite_std_dev(w)?;
            Ok(periodic * annualizer)
        })
        .collect::<EngineResult<Vec<f64>>>()?;

    tracing::debug!(
        prices = prices.len(),
        window,
        points = series.len(),
        "computed rolling volatility"
    );
    Ok(series)
}

/// Log returns of consecutive observations
pub fn log_returns(prices: &[f64]) -> EngineResult<Vec<f64>> {
    for (i, &p) in prices.iter().enumerate() {
        validate_positive_finite(&format!("prices[{}]", i), p)?;
    }
    prices
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let r = (w[1] / w[0]).ln();
            if r.is_finite() {
                Ok(r)
            } else {
                Err(EngineError::NumericalInstability {
                    quantity: "log return".to_string(),
                    reason: format!("ratio prices[{}] / prices[{}] overflows", i + 1, i),
                })
            }
        })
        .collect()
}

/// Prices a `window`-return estimate needs, checked against what was supplied
fn required_prices(prices: &[f64], window: usize) -> EngineResult<usize> {
    validate_count("window", window, 2)?;
    let required = window
        .checked_add(1)
        .ok_or_else(|| EngineError::invalid("window", window, "too large to hold window + 1 prices"))?;
    if prices.len() < required {
        return Err(EngineError::InsufficientData {
            required,
            actual: prices.len(),
        });
    }
    Ok(required)
}

fn finite_std_dev(returns: &[f64]) -> EngineResult<f64> {
    let periodic = returns.std_dev();
    if periodic.is_finite() {
        Ok(periodic)
    } else {
        Err(EngineError::NumericalInstability {
            quantity: "historical volatility".to_string(),
            reason: format!("non-finite standard deviation over {} returns", returns.len()),
        })
    }
}

fn estimate(returns: &[f64], periods_per_year: u32) -> EngineResult<VolatilityEstimate> {
    if returns.len() < 2 {
        return Err(EngineError::InsufficientData {
            required: 3,
            actual: returns.len() + 1,
        });
    }
    let periodic = finite_std_dev(returns)?;
    let annualized = periodic * (periods_per_year as f64).sqrt();

    tracing::debug!(
        observations = returns.len(),
        periods_per_year,
        annualized,
        "estimated historical volatility"
    );
    Ok(VolatilityEstimate {
        annualized,
        periodic,
        observations: returns.len(),
        periods_per_year,
    })
}

fn validate_periods(periods: u32) -> EngineResult<()> {
    if periods == 0 {
        Err(EngineError::invalid(
            "trading_periods_per_year",
            periods,
            "must be positive (> 0)",
        ))
    } else {
        Ok(())
    }
}
