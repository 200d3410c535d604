//! Error types for `opgraph`.
//!
//! This module provides a unified error type for everything around the
//! graph core: plan configuration, tabular input, the operation dictionary
//! and the results log. Graph mutation itself never fails (structural
//! violations are no-ops) and scheme findings are reported as data.

use thiserror::Error;

use crate::scheme::SchemeReport;

/// Result type alias for `opgraph` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `opgraph` operations.
///
/// Error codes follow the pattern `OPG-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Operation id missing from the plan configuration (OPG-001).
    #[error("[OPG-001] Operation '{0}' is not configured")]
    OperationNotConfigured(String),

    /// Function name missing from the operation dictionary (OPG-002).
    #[error("[OPG-002] Operation function '{0}' not found")]
    OperationNotFound(String),

    /// Registered function kind does not match the input kind (OPG-003).
    #[error("[OPG-003] Operation function '{name}' does not accept {expected} input")]
    TypeMismatch {
        /// Function name.
        name: String,
        /// Input kind the caller supplied.
        expected: &'static str,
    },

    /// Reducer is undefined on an empty column (OPG-004).
    #[error("[OPG-004] Operation function '{0}' received an empty column")]
    EmptyColumn(String),

    /// Cell that should be numeric could not be parsed (OPG-005).
    #[error("[OPG-005] Cell '{value}' in column {column} is not a number")]
    NotANumber {
        /// 0-based column index.
        column: usize,
        /// Offending cell text.
        value: String,
    },

    /// Plan configuration is invalid (OPG-006).
    #[error("[OPG-006] Plan configuration error: {0}")]
    Plan(String),

    /// Scheme text was rejected (OPG-007).
    #[error("[OPG-007] Scheme rejected: {0}")]
    Scheme(#[from] SchemeReport),

    /// CSV error (OPG-008).
    #[error("[OPG-008] Table error: {0}")]
    Table(#[from] csv::Error),

    /// YAML error (OPG-009).
    #[error("[OPG-009] Plan parse error: {0}")]
    PlanParse(#[from] serde_yaml::Error),

    /// IO error (OPG-010).
    #[error("[OPG-010] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code (e.g., "OPG-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OperationNotConfigured(_) => "OPG-001",
            Self::OperationNotFound(_) => "OPG-002",
            Self::TypeMismatch { .. } => "OPG-003",
            Self::EmptyColumn(_) => "OPG-004",
            Self::NotANumber { .. } => "OPG-005",
            Self::Plan(_) => "OPG-006",
            Self::Scheme(_) => "OPG-007",
            Self::Table(_) => "OPG-008",
            Self::PlanParse(_) => "OPG-009",
            Self::Io(_) => "OPG-010",
        }
    }

    /// Returns true if a run can continue past this error.
    ///
    /// Per-node failures (missing configuration, dictionary mismatches, bad
    /// cells) are turned into log warnings; IO failures abort the run.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
