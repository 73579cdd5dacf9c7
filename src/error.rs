//! Error types for loan parameter validation and schedule export

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating inputs, building schedules, or exporting them.
///
/// Schedule construction itself only fails on invalid input; a schedule that
/// never pays off is reported through the summary's termination marker, not here.
#[derive(Error, Debug)]
pub enum LoanError {
    /// A numeric parameter is negative, non-finite, or otherwise out of range.
    #[error("Invalid parameter `{field}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending field
        field: &'static str,
        /// Value that was rejected
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A frequency value outside the supported set.
    #[error("Unsupported {kind} frequency: {value} periods per year")]
    UnsupportedFrequency {
        /// "compounding" or "payment"
        kind: &'static str,
        /// Periods per year that was requested
        value: u32,
    },

    /// Advancing a payment date left chrono's representable range.
    #[error("Payment date overflow advancing from {date}")]
    DateOverflow {
        /// Last date that could be represented
        date: NaiveDate,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoanError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { field, value, reason }
    }

    /// Create an unsupported frequency error.
    pub fn unsupported_frequency(kind: &'static str, value: u32) -> Self {
        Self::UnsupportedFrequency { kind, value }
    }

    /// Check if this error came from input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::UnsupportedFrequency { .. }
        )
    }

    /// Check if this is a date overflow error.
    pub fn is_date_overflow(&self) -> bool {
        matches!(self, Self::DateOverflow { .. })
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
