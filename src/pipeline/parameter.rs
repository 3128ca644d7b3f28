/// Parameter policy
///
/// Decides, from the mode alone, whether a parameter is needed, what the
/// parameter field is labelled, and how its text is validated.
use std::fmt;
use std::num::IntErrorKind;

use super::error::ValidationError;
use crate::state::selection::Mode;

/// How a mode's parameter text is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterRule {
    /// The mode takes no parameter
    None,
    /// Integer threshold in [0, 255]
    Threshold,
    /// Strictly positive real (gaussian sigma)
    Sigma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub required: bool,
    pub label: &'static str,
    pub rule: ParameterRule,
}

/// A validated parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Threshold(u8),
    Sigma(f64),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(value) => write!(f, "{value}"),
            Self::Sigma(value) => write!(f, "{value}"),
        }
    }
}

/// Parameter policy for a mode
pub fn spec(mode: Mode) -> ParameterSpec {
    match mode {
        Mode::Binarize => ParameterSpec {
            required: true,
            label: "Threshold (0-255):",
            rule: ParameterRule::Threshold,
        },
        Mode::Smooth | Mode::Log => ParameterSpec {
            required: true,
            label: "Sigma (e.g. 1.5):",
            rule: ParameterRule::Sigma,
        },
        Mode::EdgeDetect | Mode::Laplacian => ParameterSpec {
            required: false,
            label: "Parameter:",
            rule: ParameterRule::None,
        },
    }
}

/// Validate parameter text for `mode`.
/// Modes without a parameter ignore the text and yield `None`.
pub fn validate(mode: Mode, text: &str) -> Result<Option<ParameterValue>, ValidationError> {
    spec(mode).validate(text)
}

impl ParameterSpec {
    pub fn validate(&self, text: &str) -> Result<Option<ParameterValue>, ValidationError> {
        if self.rule == ParameterRule::None {
            return Ok(None);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyParameter);
        }

        match self.rule {
            ParameterRule::None => Ok(None),
            ParameterRule::Threshold => parse_threshold(text).map(Some),
            ParameterRule::Sigma => parse_sigma(text).map(Some),
        }
    }
}

fn parse_threshold(text: &str) -> Result<ParameterValue, ValidationError> {
    let value: i64 = text.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ValidationError::OutOfRange,
        _ => ValidationError::NotANumber,
    })?;

    u8::try_from(value)
        .map(ParameterValue::Threshold)
        .map_err(|_| ValidationError::OutOfRange)
}

fn parse_sigma(text: &str) -> Result<ParameterValue, ValidationError> {
    let value: f64 = text.parse().map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if value <= 0.0 {
        return Err(ValidationError::OutOfRange);
    }
    Ok(ParameterValue::Sigma(value))
}
