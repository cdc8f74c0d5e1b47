// src/error.rs
use thiserror::Error;

/// Error types for the bs-engine library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Not enough observations to form an estimate
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Market data could not be obtained by the caller's data layer.
    ///
    /// The engine never raises this itself. Data layers report fetch failures
    /// with it instead of invoking the engine on fabricated defaults.
    #[error("Data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// Finite inputs produced a non-finite result
    #[error("Numerical instability computing {quantity}: {reason}")]
    NumericalInstability { quantity: String, reason: String },

    /// Invalid configuration override
    #[error("Invalid configuration for '{key}': {reason}")]
    Configuration { key: String, reason: String },
}

impl EngineError {
    pub fn invalid(parameter: &str, value: impl ToString, constraint: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, EngineError::InvalidParameter { .. })
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, EngineError::InsufficientData { .. })
    }
}

/// Result type alias for bs-engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Validation utilities
pub mod validation {
    use super::{EngineError, EngineResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> EngineResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(EngineError::invalid(name, value, "must be positive (> 0)"))
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> EngineResult<()> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(EngineError::invalid(name, value, "must be non-negative (≥ 0)"))
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> EngineResult<()> {
        if !value.is_finite() {
            Err(EngineError::invalid(
                name,
                value,
                "must be finite (not NaN or infinite)",
            ))
        } else {
            Ok(())
        }
    }

    /// Finite and strictly positive
    pub fn validate_positive_finite(name: &str, value: f64) -> EngineResult<()> {
        validate_finite(name, value)?;
        validate_positive(name, value)
    }

    /// Validate a count that must be at least `min`
    pub fn validate_count(name: &str, value: usize, min: usize) -> EngineResult<()> {
        if value < min {
            Err(EngineError::invalid(
                name,
                value,
                format!("must be at least {}", min),
            ))
        } else {
            Ok(())
        }
    }
}
