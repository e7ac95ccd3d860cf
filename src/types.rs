use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalcError;

/// identifier of a stored record
///
/// derived from the creation time in milliseconds and bumped when needed so
/// that ids handed out by one store strictly increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        RecordId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// next id after `last` for a clock reading of `millis`
    pub fn next_after(last: Option<RecordId>, millis: i64) -> Self {
        match last {
            Some(RecordId(prev)) if prev >= millis => RecordId(prev + 1),
            _ => RecordId(millis),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// interest calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestMethod {
    /// interest on the original principal only
    Simple,
    /// interest added to principal every period
    Compound,
}

impl InterestMethod {
    pub fn label(&self) -> &'static str {
        match self {
            InterestMethod::Simple => "Simple",
            InterestMethod::Compound => "Compound",
        }
    }
}

impl FromStr for InterestMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(InterestMethod::Simple),
            "compound" => Ok(InterestMethod::Compound),
            _ => Err(CalcError::InvalidChoice {
                field: "calculation method",
                value: s.to_string(),
            }),
        }
    }
}

/// unit the loan tenure is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    Years,
    Months,
}

impl TenureUnit {
    pub fn months_per_unit(&self) -> u32 {
        match self {
            TenureUnit::Years => 12,
            TenureUnit::Months => 1,
        }
    }
}

impl FromStr for TenureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "years" | "year" => Ok(TenureUnit::Years),
            "months" | "month" => Ok(TenureUnit::Months),
            _ => Err(CalcError::InvalidChoice {
                field: "tenure unit",
                value: s.to_string(),
            }),
        }
    }
}

/// kind of calculation a record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    Interest,
    Emi,
}

impl CalculationKind {
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::Interest => "Interest",
            CalculationKind::Emi => "EMI",
        }
    }
}

/// the two record collections kept by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// bounded, most recent first, oldest evicted on overflow
    History,
    /// unbounded, explicit removal only
    Favorites,
}
