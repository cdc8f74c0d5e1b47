// src/models/option.rs
//! European option contract and market inputs for the Black-Scholes model.

use crate::error::{validation::*, EngineError, EngineResult};
use std::fmt;
use std::str::FromStr;

/// Call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(EngineError::invalid(
                "option_type",
                s,
                "must be one of 'call' or 'put'",
            )),
        }
    }
}

/// The five Black-Scholes inputs plus the contract side.
///
/// Fields are public so callers can build the struct literally; every engine
/// entry point calls [`OptionParameters::validate`] before computing, so an
/// invalid literal surfaces as `InvalidParameter` rather than NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionParameters {
    /// Current underlying price S
    pub spot: f64,
    /// Strike price K
    pub strike: f64,
    /// Time to expiry T in years
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate r
    pub risk_free_rate: f64,
    /// Annualized volatility σ
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionParameters {
    /// Build and validate a parameter set
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> EngineResult<Self> {
        let params = OptionParameters {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the model invariants: S, K, T, σ finite and > 0, r finite.
    pub fn validate(&self) -> EngineResult<()> {
        validate_positive_finite("spot", self.spot)?;
        validate_positive_finite("strike", self.strike)?;
        validate_positive_finite("time_to_expiry", self.time_to_expiry)?;
        validate_positive_finite("volatility", self.volatility)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        Ok(())
    }

    pub fn with_spot(self, spot: f64) -> Self {
        OptionParameters { spot, ..self }
    }

    pub fn with_strike(self, strike: f64) -> Self {
        OptionParameters { strike, ..self }
    }

    pub fn with_time_to_expiry(self, time_to_expiry: f64) -> Self {
        OptionParameters {
            time_to_expiry,
            ..self
        }
    }

    pub fn with_risk_free_rate(self, risk_free_rate: f64) -> Self {
        OptionParameters {
            risk_free_rate,
            ..self
        }
    }

    pub fn with_volatility(self, volatility: f64) -> Self {
        OptionParameters { volatility, ..self }
    }

    pub fn with_option_type(self, option_type: OptionType) -> Self {
        OptionParameters {
            option_type,
            ..self
        }
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> OptionParameters {
        OptionParameters {
            spot: 100.0,
            strike: 100.0,
            time_to_expiry: 1.0,
            risk_free_rate: 0.05,
            volatility: 0.2,
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_option_type_parsing() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);

        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_new_validates() {
        assert!(OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_ok());
        // Negative rates are allowed
        assert!(OptionParameters::new(100.0, 100.0, 1.0, -0.01, 0.2, OptionType::Put).is_ok());

        for (spot, strike, t, r, sigma) in [
            (0.0, 100.0, 1.0, 0.05, 0.2),
            (100.0, 0.0, 1.0, 0.05, 0.2),
            (100.0, 100.0, 0.0, 0.05, 0.2),
            (100.0, 100.0, 1.0, 0.05, 0.0),
            (100.0, 100.0, 1.0, 0.05, -0.2),
            (f64::NAN, 100.0, 1.0, 0.05, 0.2),
            (100.0, f64::INFINITY, 1.0, 0.05, 0.2),
            (100.0, 100.0, 1.0, f64::NAN, 0.2),
        ] {
            let result = OptionParameters::new(spot, strike, t, r, sigma, OptionType::Call);
            assert!(
                matches!(result, Err(EngineError::InvalidParameter { .. })),
                "expected rejection of ({}, {}, {}, {}, {})",
                spot,
                strike,
                t,
                r,
                sigma
            );
        }
    }

    #[test]
    fn test_error_names_offending_field() {
        let err = atm_call().with_volatility(-0.3).validate().unwrap_err();
        match err {
            EngineError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "volatility"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_with_overrides_leave_base_untouched() {
        let base = atm_call();
        let shifted = base.with_spot(120.0).with_option_type(OptionType::Put);
        assert_eq!(base.spot, 100.0);
        assert_eq!(shifted.spot, 120.0);
        assert_eq!(shifted.option_type, OptionType::Put);
        assert_eq!(shifted.strike, base.strike);
    }

    #[test]
    fn test_discount_factor() {
        let df = atm_call().discount_factor();
        assert!((df - 0.951229424500714).abs() < 1e-14);
    }
}
