//! Error types for the calculator
//!
//! The engine functions themselves never fail; these errors come from input
//! validation and from loading rule or scenario files.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single field that is outside its allowed domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Input field name (snake_case, as in scenario CSV headers)
    pub field: &'static str,

    /// Human readable constraint, e.g. ">= 0"
    pub constraint: &'static str,

    /// Offending value
    pub value: f64,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be {} (got {})", self.field, self.constraint, self.value)
    }
}

/// Every violated constraint found in one input set
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input: {}", join_violations(.violations))]
pub struct InvalidInputError {
    pub violations: Vec<FieldViolation>,
}

impl InvalidInputError {
    /// Whether a given field is among the violations
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Errors raised by loaders and checked engine entry points
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("unknown tax rule parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid value for tax rule parameter {parameter}: {value}")]
    InvalidParameter { parameter: String, value: String },
}

pub type Result<T> = std::result::Result<T, CalculatorError>;

fn join_violations(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
