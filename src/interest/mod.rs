pub mod compound;
pub mod simple;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::input::{ensure_positive, InterestInput};
use crate::types::InterestMethod;

pub use compound::{effective_annual_rate, CompoundingEngine, CompoundingFrequency, PeriodTerms};
pub use simple::simple_interest;

/// interest calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestResult {
    pub principal: Money,
    pub interest_earned: Money,
    pub total_amount: Money,
    pub annual_rate: Rate,
    pub duration_years: Decimal,
    pub method: InterestMethod,
    pub compounding_frequency: CompoundingFrequency,
}

impl InterestResult {
    /// effective annual rate, only meaningful for compound results
    pub fn effective_annual_rate(&self) -> Option<Rate> {
        match self.method {
            InterestMethod::Simple => None,
            InterestMethod::Compound => Some(effective_annual_rate(
                self.annual_rate,
                self.compounding_frequency,
            )),
        }
    }
}

/// compute simple or compound interest
///
/// `annual_rate_percent` is a percentage figure (7.5 for 7.5%).
pub fn compute_interest(
    principal: Money,
    annual_rate_percent: Decimal,
    years: Decimal,
    frequency: CompoundingFrequency,
    method: InterestMethod,
) -> Result<InterestResult> {
    ensure_positive("principal", principal.as_decimal())?;
    ensure_positive("interest rate", annual_rate_percent)?;
    ensure_positive("duration", years)?;

    let annual_rate = Rate::from_percent(annual_rate_percent);

    let (interest_earned, total_amount) = match method {
        InterestMethod::Simple => {
            let interest = simple_interest(principal, annual_rate, years, frequency)?;
            let total = principal.checked_add(interest).ok_or_else(|| CalcError::CalculationError {
                message: "total amount overflowed".to_string(),
            })?;
            (interest, total)
        }
        InterestMethod::Compound => {
            let amount = CompoundingEngine::new(frequency).final_amount(principal, annual_rate, years)?;
            (amount - principal, amount)
        }
    };

    tracing::debug!(
        %principal,
        rate = %annual_rate,
        %years,
        ?frequency,
        ?method,
        interest = %interest_earned,
        "interest computed"
    );

    Ok(InterestResult {
        principal,
        interest_earned,
        total_amount,
        annual_rate,
        duration_years: years,
        method,
        compounding_frequency: frequency,
    })
}

/// compute interest from an already validated input
pub fn compute_interest_for(input: &InterestInput) -> Result<InterestResult> {
    compute_interest(
        input.principal,
        input.annual_rate_percent,
        input.duration_years,
        input.compounding_frequency,
        input.method,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_interest_matches_formula() {
        let cases = [
            (dec!(10000), dec!(5), dec!(3)),
            (dec!(2500.50), dec!(7.25), dec!(1.5)),
            (dec!(1), dec!(0.1), dec!(30)),
            (dec!(987654.32), dec!(18), dec!(12)),
        ];

        for (p, r, t) in cases {
            let result = compute_interest(
                Money::from_decimal(p),
                r,
                t,
                CompoundingFrequency::Yearly,
                InterestMethod::Simple,
            )
            .unwrap();

            let expected = Money::from_decimal(p * r * t / dec!(100));
            assert_eq!(result.interest_earned, expected);
            assert_eq!(result.total_amount, Money::from_decimal(p) + expected);
        }
    }

    #[test]
    fn test_compound_interest() {
        let result = compute_interest(
            Money::from_major(10_000),
            dec!(12),
            dec!(1),
            CompoundingFrequency::Monthly,
            InterestMethod::Compound,
        )
        .unwrap();

        assert_eq!(result.total_amount.round_dp(2), Money::from_str_exact("11268.25").unwrap());
        assert_eq!(result.interest_earned, result.total_amount - result.principal);
        assert!(result.effective_annual_rate().is_some());
    }

    #[test]
    fn test_compound_quarterly() {
        let result = compute_interest(
            Money::from_major(100_000),
            dec!(8),
            dec!(2),
            CompoundingFrequency::Quarterly,
            InterestMethod::Compound,
        )
        .unwrap();

        // 100000 * 1.02^8
        assert_eq!(result.total_amount.round_dp(2), Money::from_str_exact("117165.94").unwrap());
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let zero_principal = compute_interest(
            Money::ZERO,
            dec!(5),
            dec!(1),
            CompoundingFrequency::Yearly,
            InterestMethod::Simple,
        );
        assert!(matches!(zero_principal, Err(CalcError::NonPositive { field: "principal", .. })));

        let negative_rate = compute_interest(
            Money::from_major(100),
            dec!(-5),
            dec!(1),
            CompoundingFrequency::Yearly,
            InterestMethod::Compound,
        );
        assert!(matches!(negative_rate, Err(CalcError::NonPositive { field: "interest rate", .. })));

        let zero_years = compute_interest(
            Money::from_major(100),
            dec!(5),
            Decimal::ZERO,
            CompoundingFrequency::Monthly,
            InterestMethod::Simple,
        );
        assert!(zero_years.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_huge_principal_errors_instead_of_panicking() {
        let huge = Money::from_decimal(Decimal::from_scientific("1e27").unwrap());

        let simple = compute_interest(huge, dec!(100), dec!(100), CompoundingFrequency::Yearly, InterestMethod::Simple);
        assert!(matches!(simple, Err(CalcError::CalculationError { .. })));

        let compound = compute_interest(huge, dec!(100), dec!(100), CompoundingFrequency::Yearly, InterestMethod::Compound);
        assert!(matches!(compound, Err(CalcError::CalculationError { .. })));
    }
}
