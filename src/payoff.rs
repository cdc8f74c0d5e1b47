// src/payoff.rs
//! Option Payoff at Expiry
//!
//! # Mathematical Definitions
//!
//! - **Call**: max(S_T - K, 0), the right to buy at strike K
//! - **Put**: max(K - S_T, 0), the right to sell at strike K
//!
//! Profit/loss for a long position subtracts the premium paid:
//! ```text
//! P&L(S_T) = payoff(S_T) - premium
//! ```
//!
//! Breakeven is K + premium for calls and K - premium for puts. The most a
//! long holder can lose is the premium; a call's upside is unbounded while a
//! put's is capped at K - premium (underlying going to zero).

use crate::error::{validation::*, EngineResult};
use crate::models::OptionType;
use crate::sweep::SweepRange;

/// Intrinsic value at expiry
pub fn intrinsic_value(option_type: OptionType, strike: f64, spot_at_expiry: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot_at_expiry - strike).max(0.0),
        OptionType::Put => (strike - spot_at_expiry).max(0.0),
    }
}

/// One point of a payoff diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffPoint {
    pub spot: f64,
    pub payoff: f64,
    pub profit_loss: f64,
}

/// Summary of a long option held to expiry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffProfile {
    pub breakeven: f64,
    pub max_loss: f64,
    /// `None` when the upside is unbounded
    pub max_profit: Option<f64>,
}

/// Breakeven, maximum loss and maximum profit for a long option
pub fn payoff_profile(
    option_type: OptionType,
    strike: f64,
    premium: f64,
) -> EngineResult<PayoffProfile> {
    validate_inputs(strike, premium)?;
    Ok(match option_type {
        OptionType::Call => PayoffProfile {
            breakeven: strike + premium,
            max_loss: premium,
            max_profit: None,
        },
        OptionType::Put => PayoffProfile {
            breakeven: strike - premium,
            max_loss: premium,
            max_profit: Some(strike - premium),
        },
    })
}

/// Payoff and P&L at each spot in `range`, ascending
pub fn payoff_diagram(
    option_type: OptionType,
    strike: f64,
    premium: f64,
    range: &SweepRange,
) -> EngineResult<Vec<PayoffPoint>> {
    validate_inputs(strike, premium)?;
    range.validate()?;
    Ok(range
        .values()
        .into_iter()
        .map(|spot| {
            let payoff = intrinsic_value(option_type, strike, spot);
            PayoffPoint {
                spot,
                payoff,
                profit_loss: payoff - premium,
            }
        })
        .collect())
}

fn validate_inputs(strike: f64, premium: f64) -> EngineResult<()> {
    validate_positive_finite("strike", strike)?;
    validate_finite("premium", premium)?;
    validate_non_negative("premium", premium)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic_value() {
        assert_eq!(intrinsic_value(OptionType::Call, 100.0, 110.0), 10.0);
        assert_eq!(intrinsic_value(OptionType::Call, 100.0, 90.0), 0.0);
        assert_eq!(intrinsic_value(OptionType::Put, 100.0, 90.0), 10.0);
        assert_eq!(intrinsic_value(OptionType::Put, 100.0, 110.0), 0.0);
    }

    #[test]
    fn test_call_profile() {
        let profile = payoff_profile(OptionType::Call, 100.0, 10.45).unwrap();
        assert!((profile.breakeven - 110.45).abs() < 1e-12);
        assert_eq!(profile.max_loss, 10.45);
        assert_eq!(profile.max_profit, None);
    }

    #[test]
    fn test_put_profile() {
        let profile = payoff_profile(OptionType::Put, 100.0, 5.57).unwrap();
        assert!((profile.breakeven - 94.43).abs() < 1e-12);
        assert!((profile.max_profit.unwrap() - 94.43).abs() < 1e-12);
    }

    #[test]
    fn test_profile_rejects_bad_inputs() {
        assert!(payoff_profile(OptionType::Call, 0.0, 1.0).is_err());
        assert!(payoff_profile(OptionType::Call, 100.0, -1.0).is_err());
        assert!(payoff_profile(OptionType::Put, 100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_diagram_breakeven_crossing() {
        let range = SweepRange::new(50.0, 150.0, 101).unwrap();
        let diagram = payoff_diagram(OptionType::Call, 100.0, 10.0, &range).unwrap();
        assert_eq!(diagram.len(), 101);
        assert_eq!(diagram[0].profit_loss, -10.0);

        let at_breakeven = diagram.iter().find(|p| (p.spot - 110.0).abs() < 1e-9).unwrap();
        assert!(at_breakeven.profit_loss.abs() < 1e-9);
        assert!(diagram.windows(2).all(|w| w[0].spot < w[1].spot));
    }
}
