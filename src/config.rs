// src/config.rs
//! Engine defaults, overridable from the environment.
//!
//! Recognised variables (a `.env` file is loaded first when present):
//!
//! | Variable | Default |
//! |---|---|
//! | `BS_TRADING_PERIODS_PER_YEAR` | 252 |
//! | `BS_VOLATILITY_WINDOW` | 30 |
//! | `BS_SWEEP_POINTS` | 50 |
//! | `BS_SWEEP_RANGE_PCT` | 0.2 |
//! | `BS_SURFACE_POINTS` | 30 |
//! | `BS_CONTRACT_MULTIPLIER` | 100 |

use crate::analytics::volatility::TRADING_DAYS_PER_YEAR;
use crate::error::{validation::*, EngineError, EngineResult};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Annualization factor for historical volatility
    pub trading_periods_per_year: u32,
    /// Returns used by the trailing volatility estimate
    pub volatility_window: usize,
    /// Points per default 1D sweep
    pub sweep_points: usize,
    /// Half-width of default spot/strike sweeps as a fraction of the base value
    pub sweep_range_pct: f64,
    /// Points per axis of the default surface
    pub surface_points: usize,
    /// Units of underlying per contract
    pub contract_multiplier: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            trading_periods_per_year: TRADING_DAYS_PER_YEAR,
            volatility_window: 30,
            sweep_points: 50,
            sweep_range_pct: 0.2,
            surface_points: 30,
            contract_multiplier: 100,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `BS_*` environment variables
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `BS_*` key
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            trading_periods_per_year: parse_or(
                &lookup,
                "BS_TRADING_PERIODS_PER_YEAR",
                defaults.trading_periods_per_year,
            )?,
            volatility_window: parse_or(&lookup, "BS_VOLATILITY_WINDOW", defaults.volatility_window)?,
            sweep_points: parse_or(&lookup, "BS_SWEEP_POINTS", defaults.sweep_points)?,
            sweep_range_pct: parse_or(&lookup, "BS_SWEEP_RANGE_PCT", defaults.sweep_range_pct)?,
            surface_points: parse_or(&lookup, "BS_SURFACE_POINTS", defaults.surface_points)?,
            contract_multiplier: parse_or(
                &lookup,
                "BS_CONTRACT_MULTIPLIER",
                defaults.contract_multiplier,
            )?,
        };
        config.validate()?;
        tracing::debug!(?config, "loaded engine configuration");
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.trading_periods_per_year == 0 {
            return Err(config_error("trading_periods_per_year", "must be greater than 0"));
        }
        if self.contract_multiplier == 0 {
            return Err(config_error("contract_multiplier", "must be greater than 0"));
        }
        validate_count("volatility_window", self.volatility_window, 2)?;
        validate_count("sweep_points", self.sweep_points, 1)?;
        validate_count("surface_points", self.surface_points, 1)?;
        validate_finite("sweep_range_pct", self.sweep_range_pct)?;
        if self.sweep_range_pct <= 0.0 || self.sweep_range_pct >= 1.0 {
            return Err(config_error("sweep_range_pct", "must be in (0, 1)"));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> EngineResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => {
            tracing::warn!(key, "empty configuration override ignored");
            Ok(default)
        }
        Some(raw) => raw.trim().parse::<T>().map_err(|e| EngineError::Configuration {
            key: key.to_string(),
            reason: format!("cannot parse '{}': {}", raw, e),
        }),
    }
}

fn config_error(key: &str, reason: &str) -> EngineError {
    EngineError::Configuration {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trading_periods_per_year, 252);
        assert_eq!(config.sweep_points, 50);
    }

    #[test]
    fn test_overrides_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("BS_TRADING_PERIODS_PER_YEAR", "365"),
            ("BS_SWEEP_RANGE_PCT", " 0.1 "),
            ("BS_SURFACE_POINTS", ""),
        ]))
        .unwrap();
        assert_eq!(config.trading_periods_per_year, 365);
        assert_eq!(config.sweep_range_pct, 0.1);
        assert_eq!(config.surface_points, 30);
    }

    #[test]
    fn test_unparsable_override_fails() {
        let err = EngineConfig::from_lookup(lookup_from(&[("BS_SWEEP_POINTS", "many")])).unwrap_err();
        match err {
            EngineError::Configuration { key, .. } => assert_eq!(key, "BS_SWEEP_POINTS"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_out_of_range_override_fails() {
        assert!(EngineConfig::from_lookup(lookup_from(&[("BS_SWEEP_RANGE_PCT", "1.5")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[("BS_CONTRACT_MULTIPLIER", "0")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[("BS_VOLATILITY_WINDOW", "1")])).is_err());
    }
}
