// src/position.rs
//! Scaling per-unit option values to a position of listed contracts.

use crate::analytics::bs_analytic::GreeksResult;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// A long holding of `contracts` contracts, each on `multiplier` units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub contracts: u32,
    pub multiplier: u32,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            contracts: 1,
            multiplier: 100,
        }
    }
}

impl Position {
    pub fn new(contracts: u32, multiplier: u32) -> EngineResult<Self> {
        if contracts == 0 {
            return Err(EngineError::invalid("contracts", contracts, "must be at least 1"));
        }
        if multiplier == 0 {
            return Err(EngineError::invalid("multiplier", multiplier, "must be at least 1"));
        }
        Ok(Position {
            contracts,
            multiplier,
        })
    }

    /// `contracts` contracts at the configured multiplier
    pub fn with_config(contracts: u32, config: &EngineConfig) -> EngineResult<Self> {
        Position::new(contracts, config.contract_multiplier)
    }

    /// Units of underlying controlled
    pub fn units(&self) -> f64 {
        self.contracts as f64 * self.multiplier as f64
    }

    pub fn market_value(&self, unit_price: f64) -> f64 {
        unit_price * self.units()
    }

    pub fn scale_greeks(&self, greeks: &GreeksResult) -> GreeksResult {
        let units = self.units();
        GreeksResult {
            delta: greeks.delta * units,
            gamma: greeks.gamma * units,
            vega: greeks.vega * units,
            theta: greeks.theta * units,
            rho: greeks.rho * units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_value() {
        let position = Position::new(3, 100).unwrap();
        assert!((position.market_value(10.4506) - 3135.18).abs() < 1e-9);
        assert_eq!(Position::default().units(), 100.0);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(Position::new(0, 100).unwrap_err().is_invalid_parameter());
        assert!(Position::new(1, 0).is_err());
    }

    #[test]
    fn test_scale_greeks() {
        let greeks = GreeksResult {
            delta: 0.5,
            gamma: 0.02,
            vega: 0.4,
            theta: -0.02,
            rho: 0.5,
        };
        let scaled = Position::new(2, 100).unwrap().scale_greeks(&greeks);
        assert_eq!(scaled.delta, 100.0);
        assert_eq!(scaled.gamma, 4.0);
        assert_eq!(scaled.theta, -4.0);
    }

    #[test]
    fn test_with_config_uses_multiplier() {
        let config = EngineConfig {
            contract_multiplier: 10,
            ..EngineConfig::default()
        };
        assert_eq!(Position::with_config(5, &config).unwrap().units(), 50.0);
    }
}
