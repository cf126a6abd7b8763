//! Grading error types.
//!
//! Build-time errors abort a whole worksheet or submission batch. A
//! conversion error is recoverable: the worksheet keeps the question but
//! leaves its answer absent.

use thiserror::Error;

/// A unit pair the registry cannot convert between.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No family defines the ordered pair.
    #[error("unsupported conversion: from '{from}' to '{to}'")]
    Unsupported { from: String, to: String },
}

/// Fatal errors raised while building a worksheet or submission batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// A worksheet row did not have exactly three fields.
    #[error("worksheet row {row}: expected {expected} fields, found {found}")]
    WorksheetFieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A worksheet input value is not a decimal number.
    #[error("worksheet row {row}: invalid input number '{value}'")]
    InvalidInput { row: usize, value: String },

    /// A submission row carried no fields at all.
    #[error("submission row {row}: row is empty, expected a student name")]
    EmptySubmissionRow { row: usize },

    /// A non-empty response is not a decimal number.
    #[error("submission row {row}: invalid response '{value}' for student '{student}'")]
    InvalidResponse {
        row: usize,
        student: String,
        value: String,
    },
}

impl GradingError {
    /// The 1-based input row the error refers to.
    pub fn row(&self) -> usize {
        match self {
            GradingError::WorksheetFieldCount { row, .. }
            | GradingError::InvalidInput { row, .. }
            | GradingError::EmptySubmissionRow { row }
            | GradingError::InvalidResponse { row, .. } => *row,
        }
    }
}

/// Parse a grid cell as a finite decimal number.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
