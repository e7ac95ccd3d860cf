use rust_decimal::Decimal;

use crate::decimal::{growth_factor, Money, Rate};
use crate::errors::{CalcError, Result};

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Yearly,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Yearly => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompoundingFrequency::Yearly => "Yearly",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
        }
    }
}

impl std::str::FromStr for CompoundingFrequency {
    type Err = CalcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" | "annual" | "annually" => Ok(CompoundingFrequency::Yearly),
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            _ => Err(CalcError::InvalidChoice {
                field: "compounding frequency",
                value: s.to_string(),
            }),
        }
    }
}

/// per-period rate and number of periods after the frequency adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTerms {
    pub period_rate: Rate,
    pub periods: Decimal,
}

/// engine for compound interest calculations
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// split an annual rate and a duration in years into period terms
    pub fn period_terms(&self, annual_rate: Rate, years: Decimal) -> PeriodTerms {
        let n = self.frequency.periods_per_year();
        PeriodTerms {
            period_rate: annual_rate.per_period(n),
            periods: years * Decimal::from(n),
        }
    }

    /// final amount `principal * (1 + rate)^periods`
    pub fn final_amount(
        &self,
        principal: Money,
        annual_rate: Rate,
        years: Decimal,
    ) -> Result<Money> {
        let terms = self.period_terms(annual_rate, years);
        let factor = growth_factor(terms.period_rate.as_decimal(), terms.periods)
            .ok_or_else(|| CalcError::CalculationError {
                message: format!(
                    "growth factor overflowed for {} periods at {}",
                    terms.periods, terms.period_rate
                ),
            })?;
        principal
            .as_decimal()
            .checked_mul(factor)
            .map(Money::from_decimal)
            .ok_or_else(|| CalcError::CalculationError {
                message: "final amount overflowed".to_string(),
            })
    }

    /// compound interest earned over the duration
    pub fn calculate_compound(
        &self,
        principal: Money,
        annual_rate: Rate,
        years: Decimal,
    ) -> Result<Money> {
        Ok(self.final_amount(principal, annual_rate, years)? - principal)
    }
}

/// effective annual rate `(1 + r/n)^n - 1` for a nominal annual rate
pub fn effective_annual_rate(annual_rate: Rate, frequency: CompoundingFrequency) -> Rate {
    let n = frequency.periods_per_year();
    let period_rate = annual_rate.per_period(n).as_decimal();
    let factor = growth_factor(period_rate, Decimal::from(n)).unwrap_or(Decimal::ONE);
    Rate::from_decimal(factor - Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_compounding() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Monthly);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(12);

        let interest = engine.calculate_compound(principal, rate, Decimal::ONE).unwrap();

        let expected = Money::from_str_exact("1268.25").unwrap();
        assert_eq!(interest.round_dp(2), expected);
    }

    #[test]
    fn test_yearly_compounding() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Yearly);
        let amount = engine
            .final_amount(Money::from_major(10_000), Rate::from_percentage(5), dec!(3))
            .unwrap();

        assert_eq!(amount.round_dp(2), Money::from_str_exact("11576.25").unwrap());
    }

    #[test]
    fn test_quarterly_period_terms() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Quarterly);
        let terms = engine.period_terms(Rate::from_percentage(8), dec!(2.5));

        assert_eq!(terms.period_rate.as_decimal(), dec!(0.02));
        assert_eq!(terms.periods, dec!(10));
    }

    #[test]
    fn test_compounding_comparison() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(12);
        let time = Decimal::ONE;

        let yearly = CompoundingEngine::new(CompoundingFrequency::Yearly)
            .calculate_compound(principal, rate, time)
            .unwrap();
        let quarterly = CompoundingEngine::new(CompoundingFrequency::Quarterly)
            .calculate_compound(principal, rate, time)
            .unwrap();
        let monthly = CompoundingEngine::new(CompoundingFrequency::Monthly)
            .calculate_compound(principal, rate, time)
            .unwrap();

        // more frequent compounding earns more
        assert!(yearly < quarterly);
        assert!(quarterly < monthly);
        assert_eq!(yearly, Money::from_major(1200));
    }

    #[test]
    fn test_fractional_years() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Yearly);
        let amount = engine
            .final_amount(Money::from_major(1_000), Rate::from_percentage(21), dec!(0.5))
            .unwrap();

        // sqrt(1.21) = 1.1
        assert!(amount.approx_eq(Money::from_major(1_100), Money::CENT));
    }

    #[test]
    fn test_effective_annual_rate() {
        let apr = Rate::from_percentage(12);

        let monthly = effective_annual_rate(apr, CompoundingFrequency::Monthly);
        assert!(monthly.as_percentage() > dec!(12.68));
        assert!(monthly.as_percentage() < dec!(12.69));

        let yearly = effective_annual_rate(apr, CompoundingFrequency::Yearly);
        assert_eq!(yearly.as_decimal(), dec!(0.12));
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(
            "Quarterly".parse::<CompoundingFrequency>().unwrap(),
            CompoundingFrequency::Quarterly
        );
        assert!("weekly".parse::<CompoundingFrequency>().is_err());
    }
}
