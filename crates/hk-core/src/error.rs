//! Error types for the dynamics engines and analyses.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Names the input that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Radius,
    Agents,
    StepSize,
    Noise,
    Tolerance,
    MaxSteps,
    InitialProfile,
    Radicals,
    Boundary,
    Topology,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Parameter::Radius => "radius",
            Parameter::Agents => "agents",
            Parameter::StepSize => "step_size",
            Parameter::Noise => "noise",
            Parameter::Tolerance => "tolerance",
            Parameter::MaxSteps => "max_steps",
            Parameter::InitialProfile => "initial_profile",
            Parameter::Radicals => "radicals",
            Parameter::Boundary => "boundary",
            Parameter::Topology => "topology",
        };
        f.write_str(name)
    }
}

/// Root error type for the crate.
#[derive(Error, Debug)]
pub enum HkError {
    /// An input was rejected before any stepping began.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter { parameter: Parameter, reason: String },

    /// A radical opinion had no exact match in the merged, sorted profile.
    #[error("radical opinion {value} not found in merged profile")]
    RadicalNotFound { value: f64 },

    /// An analysis was asked to summarise an empty profile.
    #[error("opinion profile is empty")]
    DegenerateProfile,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HkError {
    pub(crate) fn invalid(parameter: Parameter, reason: impl Into<String>) -> Self {
        HkError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// The offending input, when the error is a validation failure.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            HkError::InvalidParameter { parameter, .. } => Some(*parameter),
            HkError::RadicalNotFound { .. } => Some(Parameter::Radicals),
            HkError::DegenerateProfile => Some(Parameter::InitialProfile),
            HkError::Config(_) => None,
        }
    }
}

pub type HkResult<T> = Result<T, HkError>;

/// Rejects anything that is not a finite number strictly above zero.
pub(crate) fn require_positive(parameter: Parameter, value: f64) -> HkResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HkError::invalid(
            parameter,
            format!("must be a finite value > 0, got {}", value),
        ))
    }
}

/// Rejects anything that is not a finite number at or above zero.
pub(crate) fn require_non_negative(parameter: Parameter, value: f64) -> HkResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HkError::invalid(
            parameter,
            format!("must be a finite value >= 0, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = HkError::invalid(Parameter::StepSize, "must be > 0");
        assert_eq!(err.to_string(), "invalid step_size: must be > 0");
        assert_eq!(err.parameter(), Some(Parameter::StepSize));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(Parameter::Radius, 0.1).is_ok());
        assert!(require_positive(Parameter::Radius, 0.0).is_err());
        assert!(require_positive(Parameter::Radius, -1.0).is_err());
        assert!(require_positive(Parameter::Radius, f64::NAN).is_err());
        assert!(require_positive(Parameter::Radius, f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative(Parameter::Noise, 0.0).is_ok());
        assert!(require_non_negative(Parameter::Noise, -0.01).is_err());
    }

    #[test]
    fn test_radical_error_points_at_radicals() {
        let err = HkError::RadicalNotFound { value: 0.3 };
        assert_eq!(err.parameter(), Some(Parameter::Radicals));
    }
}
