// src/sweep/range.rs
use crate::config::EngineConfig;
use crate::error::{validation::*, EngineError, EngineResult};
use crate::math_utils::linspace;
use crate::models::OptionParameters;
use std::fmt;

/// Parameter of [`OptionParameters`] that a sweep may vary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepField {
    Spot,
    Strike,
    Volatility,
    TimeToExpiry,
    RiskFreeRate,
}

impl SweepField {
    pub fn name(&self) -> &'static str {
        match self {
            SweepField::Spot => "spot",
            SweepField::Strike => "strike",
            SweepField::Volatility => "volatility",
            SweepField::TimeToExpiry => "time_to_expiry",
            SweepField::RiskFreeRate => "risk_free_rate",
        }
    }

    /// `base` with this field replaced by `value`. Not validated.
    pub fn apply(&self, base: OptionParameters, value: f64) -> OptionParameters {
        match self {
            SweepField::Spot => base.with_spot(value),
            SweepField::Strike => base.with_strike(value),
            SweepField::Volatility => base.with_volatility(value),
            SweepField::TimeToExpiry => base.with_time_to_expiry(value),
            SweepField::RiskFreeRate => base.with_risk_free_rate(value),
        }
    }

    /// Current value of this field in `params`
    pub fn read(&self, params: &OptionParameters) -> f64 {
        match self {
            SweepField::Spot => params.spot,
            SweepField::Strike => params.strike,
            SweepField::Volatility => params.volatility,
            SweepField::TimeToExpiry => params.time_to_expiry,
            SweepField::RiskFreeRate => params.risk_free_rate,
        }
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive, evenly spaced, ascending range of `steps` values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl SweepRange {
    pub fn new(min: f64, max: f64, steps: usize) -> EngineResult<Self> {
        let range = SweepRange { min, max, steps };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> EngineResult<()> {
        validate_finite("range.min", self.min)?;
        validate_finite("range.max", self.max)?;
        validate_count("range.steps", self.steps, 1)?;
        if self.min > self.max {
            return Err(EngineError::invalid(
                "range",
                format!("[{}, {}]", self.min, self.max),
                "min must not exceed max",
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(EngineError::invalid(
                "range",
                format!("[{}, {}]", self.min, self.max),
                "width max - min must be finite",
            ));
        }
        Ok(())
    }

    /// The swept values in ascending order
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.steps)
    }
}

/// One swept dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub field: SweepField,
    pub range: SweepRange,
}

impl Axis {
    pub fn new(field: SweepField, range: SweepRange) -> Self {
        Axis { field, range }
    }
}

/// What to vary: one field, or the Cartesian product of two
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepSpec {
    Single(Axis),
    Pair(Axis, Axis),
}

impl SweepSpec {
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            SweepSpec::Single(axis) => axis.range.validate(),
            SweepSpec::Pair(first, second) => {
                first.range.validate()?;
                second.range.validate()?;
                if first.field == second.field {
                    return Err(EngineError::invalid(
                        "sweep fields",
                        first.field,
                        "the two swept fields must differ",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Range centred on `base` for exploring one field.
///
/// Spot and strike span ± `sweep_range_pct`, volatility 0.5x to 1.5x, time
/// from 0.01 years to the base expiry, and the rate from 0 to twice the base
/// (0 to 10% when the base rate is not positive).
pub fn default_range(
    field: SweepField,
    base: &OptionParameters,
    config: &EngineConfig,
) -> EngineResult<SweepRange> {
    base.validate()?;
    let steps = config.sweep_points;
    let pct = config.sweep_range_pct;
    match field {
        SweepField::Spot => SweepRange::new(base.spot * (1.0 - pct), base.spot * (1.0 + pct), steps),
        SweepField::Strike => {
            SweepRange::new(base.strike * (1.0 - pct), base.strike * (1.0 + pct), steps)
        }
        SweepField::Volatility => {
            SweepRange::new(base.volatility * 0.5, base.volatility * 1.5, steps)
        }
        SweepField::TimeToExpiry => {
            SweepRange::new(0.01_f64.min(base.time_to_expiry), base.time_to_expiry, steps)
        }
        SweepField::RiskFreeRate => {
            let upper = if base.risk_free_rate > 0.0 {
                2.0 * base.risk_free_rate
            } else {
                0.1
            };
            SweepRange::new(0.0, upper, steps)
        }
    }
}

/// Spot × volatility surface centred on `base`, `surface_points` per axis
pub fn default_surface(base: &OptionParameters, config: &EngineConfig) -> EngineResult<SweepSpec> {
    base.validate()?;
    let n = config.surface_points;
    let pct = config.sweep_range_pct;
    Ok(SweepSpec::Pair(
        Axis::new(
            SweepField::Spot,
            SweepRange::new(base.spot * (1.0 - pct), base.spot * (1.0 + pct), n)?,
        ),
        Axis::new(
            SweepField::Volatility,
            SweepRange::new(base.volatility * 0.5, base.volatility * 1.5, n)?,
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionType;

    fn base() -> OptionParameters {
        OptionParameters {
            spot: 100.0,
            strike: 105.0,
            time_to_expiry: 0.5,
            risk_free_rate: 0.05,
            volatility: 0.2,
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(SweepRange::new(80.0, 120.0, 5).is_ok());
        assert!(SweepRange::new(100.0, 100.0, 1).is_ok());
        assert!(SweepRange::new(120.0, 80.0, 5).is_err());
        assert!(SweepRange::new(80.0, 120.0, 0).is_err());
        assert!(SweepRange::new(f64::NAN, 120.0, 5).is_err());
        // Finite bounds whose width overflows
        assert!(SweepRange::new(-f64::MAX, f64::MAX, 3)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_apply_and_read_round_trip_each_field() {
        for field in [
            SweepField::Spot,
            SweepField::Strike,
            SweepField::Volatility,
            SweepField::TimeToExpiry,
            SweepField::RiskFreeRate,
        ] {
            let shifted = field.apply(base(), 0.123);
            assert_eq!(field.read(&shifted), 0.123, "field {}", field);
        }
    }

    #[test]
    fn test_pair_with_same_field_rejected() {
        let range = SweepRange::new(80.0, 120.0, 3).unwrap();
        let spec = SweepSpec::Pair(
            Axis::new(SweepField::Spot, range),
            Axis::new(SweepField::Spot, range),
        );
        assert!(spec.validate().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_default_ranges() {
        let config = EngineConfig::default();
        let spot = default_range(SweepField::Spot, &base(), &config).unwrap();
        assert!((spot.min - 80.0).abs() < 1e-12);
        assert!((spot.max - 120.0).abs() < 1e-12);
        assert_eq!(spot.steps, 50);

        let vol = default_range(SweepField::Volatility, &base(), &config).unwrap();
        assert!((vol.min - 0.1).abs() < 1e-12);
        assert!((vol.max - 0.3).abs() < 1e-12);

        let time = default_range(SweepField::TimeToExpiry, &base(), &config).unwrap();
        assert_eq!(time.min, 0.01);
        assert_eq!(time.max, 0.5);

        let rate = default_range(SweepField::RiskFreeRate, &base().with_risk_free_rate(0.0), &config)
            .unwrap();
        assert_eq!((rate.min, rate.max), (0.0, 0.1));
    }

    #[test]
    fn test_default_surface_shape() {
        let config = EngineConfig::default();
        match default_surface(&base(), &config).unwrap() {
            SweepSpec::Pair(x, y) => {
                assert_eq!(x.field, SweepField::Spot);
                assert_eq!(y.field, SweepField::Volatility);
                assert_eq!(x.range.steps, 30);
                assert_eq!(y.range.steps, 30);
            }
            other => panic!("expected a pair sweep, got {:?}", other),
        }
    }
}
