use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{growth_factor, Money, Rate};
use crate::errors::{CalcError, Result};
use crate::input::{ensure_non_negative, ensure_positive, payment_count, EmiInput};
use crate::types::TenureUnit;

/// emi calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    pub principal: Money,
    pub monthly_installment: Money,
    pub total_interest_paid: Money,
    pub total_amount_paid: Money,
    pub payment_count: u32,
    pub annual_rate: Rate,
}

impl EmiResult {
    /// principal as a percentage of everything paid
    pub fn principal_share(&self) -> Decimal {
        self.principal.share_of(self.total_amount_paid)
    }

    /// interest as a percentage of everything paid
    pub fn interest_share(&self) -> Decimal {
        self.total_interest_paid.share_of(self.total_amount_paid)
    }
}

/// compute the equated monthly installment for a loan
///
/// a zero rate is accepted and repays the principal in equal parts.
pub fn compute_emi(
    loan_amount: Money,
    annual_rate_percent: Decimal,
    tenure: Decimal,
    tenure_unit: TenureUnit,
) -> Result<EmiResult> {
    ensure_positive("loan amount", loan_amount.as_decimal())?;
    ensure_non_negative("interest rate", annual_rate_percent)?;
    let months = payment_count(tenure, tenure_unit)?;

    let annual_rate = Rate::from_percent(annual_rate_percent);
    let emi = calculate_emi(loan_amount, annual_rate, months)?;
    let total_amount_paid = emi
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| CalcError::CalculationError {
            message: format!("total repayment overflowed for {months} payments of {emi}"),
        })?;
    let total_interest_paid = total_amount_paid - loan_amount;

    tracing::debug!(
        principal = %loan_amount,
        rate = %annual_rate,
        payments = months,
        emi = %emi,
        "emi computed"
    );

    Ok(EmiResult {
        principal: loan_amount,
        monthly_installment: emi,
        total_interest_paid,
        total_amount_paid,
        payment_count: months,
        annual_rate,
    })
}

/// compute emi from an already validated input
pub fn compute_emi_for(input: &EmiInput) -> Result<EmiResult> {
    compute_emi(
        input.loan_amount,
        input.annual_rate_percent,
        input.tenure,
        input.tenure_unit,
    )
}

/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate
pub fn calculate_emi(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(CalcError::InvalidPaymentCount {
            message: "at least one payment is required".to_string(),
        });
    }

    let r = annual_rate.monthly_rate().as_decimal();
    let n = Decimal::from(months);

    if r.is_zero() {
        return Ok(principal / n);
    }

    let compound = growth_factor(r, n).ok_or_else(|| CalcError::CalculationError {
        message: format!("growth factor overflowed for {} payments", months),
    })?;
    let denominator = compound - Decimal::ONE;

    // rates too small to register in 28 digits behave like zero
    if denominator.is_zero() {
        return Ok(principal / n);
    }

    // the ratio stays near 1 for long tenures, so take it before scaling
    let ratio = compound.checked_div(denominator);
    ratio
        .and_then(|ratio| principal.as_decimal().checked_mul(r)?.checked_mul(ratio))
        .map(Money::from_decimal)
        .ok_or_else(|| CalcError::CalculationError {
            message: format!("installment overflowed for {principal} over {months} payments"),
        })
}
