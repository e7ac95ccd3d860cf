use thiserror::Error;

use crate::types::RecordId;

/// errors surfaced to callers of the calculators and the session
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("missing value for {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("{field} is not a number: {value:?}")]
    NotANumber {
        field: &'static str,
        value: String,
    },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive {
        field: &'static str,
        value: String,
    },

    #[error("{field} must not be negative, got {value}")]
    Negative {
        field: &'static str,
        value: String,
    },

    #[error("unknown {field} option: {value:?}")]
    InvalidChoice {
        field: &'static str,
        value: String,
    },

    #[error("invalid payment count: {message}")]
    InvalidPaymentCount {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("record not found: {id}")]
    RecordNotFound {
        id: RecordId,
    },

    #[error("record {id} is not an emi calculation")]
    NotAnEmiRecord {
        id: RecordId,
    },

    #[error("unknown currency: {code}")]
    UnknownCurrency {
        code: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("export failed: {message}")]
    Export {
        message: String,
    },
}

impl CalcError {
    /// true for errors caused by bad form input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CalcError::MissingField { .. }
                | CalcError::NotANumber { .. }
                | CalcError::NonPositive { .. }
                | CalcError::Negative { .. }
                | CalcError::InvalidChoice { .. }
                | CalcError::InvalidPaymentCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// storage-side failures; logged by the record store and never returned
/// to callers
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage backend failed: {message}")]
    Backend {
        message: String,
    },

    #[error("malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}
