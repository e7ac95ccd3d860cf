//! Validation boundary between string-typed form fields and the engines.
//!
//! Every value that reaches a calculator passes through
//! [`parse_and_validate`] first; the engines re-check positivity but never
//! parse text themselves.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::interest::CompoundingFrequency;
use crate::types::{InterestMethod, TenureUnit};

/// raw interest form, every field as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterestInput {
    pub principal: String,
    pub rate: String,
    pub years: String,
    /// yearly, quarterly or monthly
    pub frequency: String,
    /// simple or compound
    pub method: String,
}

impl RawInterestInput {
    pub fn new(
        principal: impl Into<String>,
        rate: impl Into<String>,
        years: impl Into<String>,
        frequency: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            principal: principal.into(),
            rate: rate.into(),
            years: years.into(),
            frequency: frequency.into(),
            method: method.into(),
        }
    }
}

/// raw emi form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmiInput {
    pub loan_amount: String,
    pub rate: String,
    pub tenure: String,
    /// years or months
    pub tenure_unit: String,
}

impl RawEmiInput {
    pub fn new(
        loan_amount: impl Into<String>,
        rate: impl Into<String>,
        tenure: impl Into<String>,
        tenure_unit: impl Into<String>,
    ) -> Self {
        Self {
            loan_amount: loan_amount.into(),
            rate: rate.into(),
            tenure: tenure.into(),
            tenure_unit: tenure_unit.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Interest(RawInterestInput),
    Emi(RawEmiInput),
}

/// validated interest input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestInput {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub duration_years: Decimal,
    pub compounding_frequency: CompoundingFrequency,
    pub method: InterestMethod,
}

/// validated emi input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiInput {
    pub loan_amount: Money,
    pub annual_rate_percent: Decimal,
    pub tenure: Decimal,
    pub tenure_unit: TenureUnit,
}

impl EmiInput {
    pub fn payment_count(&self) -> Result<u32> {
        payment_count(self.tenure, self.tenure_unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationInput {
    Interest(InterestInput),
    Emi(EmiInput),
}

/// parse and validate a raw form
pub fn parse_and_validate(raw: &RawInput) -> Result<CalculationInput> {
    match raw {
        RawInput::Interest(form) => parse_interest(form).map(CalculationInput::Interest),
        RawInput::Emi(form) => parse_emi(form).map(CalculationInput::Emi),
    }
}

pub fn parse_interest(form: &RawInterestInput) -> Result<InterestInput> {
    let principal = parse_number("principal", &form.principal)?;
    let rate = parse_number("interest rate", &form.rate)?;
    let years = parse_number("duration", &form.years)?;
    ensure_positive("principal", principal)?;
    ensure_positive("interest rate", rate)?;
    ensure_positive("duration", years)?;

    Ok(InterestInput {
        principal: Money::from_decimal(principal),
        annual_rate_percent: rate,
        duration_years: years,
        compounding_frequency: parse_choice(&form.frequency, CompoundingFrequency::Yearly)?,
        method: parse_choice(&form.method, InterestMethod::Simple)?,
    })
}

pub fn parse_emi(form: &RawEmiInput) -> Result<EmiInput> {
    let loan_amount = parse_number("loan amount", &form.loan_amount)?;
    let rate = parse_number("interest rate", &form.rate)?;
    let tenure = parse_number("tenure", &form.tenure)?;
    ensure_positive("loan amount", loan_amount)?;
    ensure_non_negative("interest rate", rate)?;
    ensure_positive("tenure", tenure)?;

    let input = EmiInput {
        loan_amount: Money::from_decimal(loan_amount),
        annual_rate_percent: rate,
        tenure,
        tenure_unit: parse_choice(&form.tenure_unit, TenureUnit::Years)?,
    };
    input.payment_count()?;
    Ok(input)
}

/// parse one numeric form field
pub fn parse_number(field: &'static str, value: &str) -> Result<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CalcError::MissingField { field });
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CalcError::NotANumber {
            field,
            value: value.to_string(),
        })
}

/// blank selections fall back to the form's default option
fn parse_choice<T>(value: &str, default: T) -> Result<T>
where
    T: FromStr<Err = CalcError>,
{
    if value.trim().is_empty() {
        Ok(default)
    } else {
        value.parse()
    }
}

pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(CalcError::NonPositive {
            field,
            value: value.to_string(),
        })
    }
}

pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        Err(CalcError::Negative {
            field,
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}

/// longest tenure accepted, 100 years of monthly payments
pub const MAX_PAYMENT_COUNT: u32 = 1_200;

/// number of monthly payments for a tenure
///
/// must come out as a whole number between one and [`MAX_PAYMENT_COUNT`].
pub fn payment_count(tenure: Decimal, unit: TenureUnit) -> Result<u32> {
    ensure_positive("tenure", tenure)?;
    let months = tenure
        .checked_mul(Decimal::from(unit.months_per_unit()))
        .ok_or_else(|| CalcError::InvalidPaymentCount {
            message: format!("tenure {} is out of range", tenure.normalize()),
        })?;
    if !months.fract().is_zero() {
        return Err(CalcError::InvalidPaymentCount {
            message: format!("{} months is not a whole number of payments", months.normalize()),
        });
    }
    months
        .to_u32()
        .ok_or_else(|| CalcError::InvalidPaymentCount {
            message: format!("{} months is out of range", months.normalize()),
        })
        .and_then(check_payment_count)
}

/// reject payment counts outside `1..=MAX_PAYMENT_COUNT`
pub fn check_payment_count(count: u32) -> Result<u32> {
    if count == 0 {
        return Err(CalcError::InvalidPaymentCount {
            message: "at least one payment is required".to_string(),
        });
    }
    if count > MAX_PAYMENT_COUNT {
        return Err(CalcError::InvalidPaymentCount {
            message: format!("{count} payments exceeds the maximum of {MAX_PAYMENT_COUNT}"),
        });
    }
    Ok(count)
}
