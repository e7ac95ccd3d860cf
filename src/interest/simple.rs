use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::interest::compound::CompoundingFrequency;

/// simple interest on the original principal, no compounding
///
/// the frequency only changes how rate and time are split into periods;
/// for simple interest the product `rate * time` is the same either way.
pub fn simple_interest(
    principal: Money,
    annual_rate: Rate,
    years: Decimal,
    frequency: CompoundingFrequency,
) -> Result<Money> {
    let n = frequency.periods_per_year();
    let period_rate = annual_rate.per_period(n).as_decimal();
    years
        .checked_mul(Decimal::from(n))
        .and_then(|periods| principal.as_decimal().checked_mul(period_rate)?.checked_mul(periods))
        .map(Money::from_decimal)
        .ok_or_else(|| CalcError::CalculationError {
            message: format!("simple interest overflowed for {principal} over {years} years"),
        })
}
