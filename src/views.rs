use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::format_currency_dp;
use crate::decimal::{Money, DISPLAY_DP};
use crate::record::{CalculationResult, Record};
use crate::types::{InterestMethod, RecordId};

/// one labelled line of a record view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// display-ready rendering of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub id: RecordId,
    pub kind: &'static str,
    pub timestamp: String,
    pub currency: String,
    pub rows: Vec<DetailRow>,
}

impl RecordView {
    /// render with the default two decimal places
    pub fn from_record(record: &Record, currency: &str) -> Self {
        Self::from_record_dp(record, currency, DISPLAY_DP)
    }

    pub fn from_record_dp(record: &Record, currency: &str, dp: u32) -> Self {
        let money = |amount: Money| format_currency_dp(amount, currency, dp);

        let rows = match &record.result {
            CalculationResult::Interest(r) => {
                let mut rows = vec![
                    DetailRow::new("Principal", money(r.principal)),
                    DetailRow::new("Interest Rate", r.annual_rate.to_string()),
                    DetailRow::new("Duration", format!("{} years", r.duration_years.normalize())),
                    DetailRow::new("Method", r.method.label()),
                ];
                if r.method == InterestMethod::Compound {
                    rows.push(DetailRow::new("Compounding", r.compounding_frequency.label()));
                }
                rows.push(DetailRow::new("Interest Earned", money(r.interest_earned)));
                rows.push(DetailRow::new("Total Amount", money(r.total_amount)));
                if let Some(ear) = r.effective_annual_rate() {
                    rows.push(DetailRow::new("Effective Annual Rate", percent(ear.as_percentage())));
                }
                rows
            }
            CalculationResult::Emi(r) => vec![
                DetailRow::new("Loan Amount", money(r.principal)),
                DetailRow::new("Interest Rate", r.annual_rate.to_string()),
                DetailRow::new("Tenure", format!("{} months", r.payment_count)),
                DetailRow::new("Monthly EMI", money(r.monthly_installment)),
                DetailRow::new("Total Interest", money(r.total_interest_paid)),
                DetailRow::new("Total Amount", money(r.total_amount_paid)),
                DetailRow::new("Principal Share", percent(r.principal_share())),
                DetailRow::new("Interest Share", percent(r.interest_share())),
            ],
        };

        Self {
            id: record.id,
            kind: record.kind().label(),
            timestamp: record.display_timestamp(),
            currency: currency.to_string(),
            rows,
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::{compute_interest, CompoundingFrequency};
    use crate::payments::compute_emi;
    use crate::types::TenureUnit;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record(result: CalculationResult) -> Record {
        Record::new(
            RecordId::new(42),
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            result,
        )
    }

    #[test]
    fn test_emi_view() {
        let emi = compute_emi(Money::from_major(500_000), dec!(10), dec!(5), TenureUnit::Years).unwrap();
        let view = RecordView::from_record(&record(emi.into()), "INR");

        assert_eq!(view.kind, "EMI");
        assert_eq!(view.timestamp, "2024-06-01 12:00:00 UTC");
        assert_eq!(view.value("Monthly EMI"), Some("₹10,623.52"));
        assert_eq!(view.value("Tenure"), Some("60 months"));
        assert_eq!(view.value("Interest Rate"), Some("10%"));
        assert_eq!(view.value("Principal Share"), Some("78.44%"));
        assert!(view.value("Compounding").is_none());
    }

    #[test]
    fn test_interest_views() {
        let simple = compute_interest(
            Money::from_major(10_000),
            dec!(5),
            dec!(2),
            CompoundingFrequency::Yearly,
            InterestMethod::Simple,
        )
        .unwrap();
        let view = RecordView::from_record(&record(simple.into()), "USD");
        assert_eq!(view.kind, "Interest");
        assert_eq!(view.value("Interest Earned"), Some("$1,000.00"));
        assert_eq!(view.value("Duration"), Some("2 years"));
        assert!(view.value("Effective Annual Rate").is_none());

        let compound = compute_interest(
            Money::from_major(10_000),
            dec!(12),
            dec!(1),
            CompoundingFrequency::Monthly,
            InterestMethod::Compound,
        )
        .unwrap();
        let view = RecordView::from_record(&record(compound.into()), "INR");
        assert_eq!(view.value("Compounding"), Some("Monthly"));
        assert_eq!(view.value("Interest Earned"), Some("₹1,268.25"));
        assert_eq!(view.value("Effective Annual Rate"), Some("12.68%"));
    }

    #[test]
    fn test_view_json() {
        let emi = compute_emi(Money::from_major(12_000), dec!(0), dec!(12), TenureUnit::Months).unwrap();
        let view = RecordView::from_record_dp(&record(emi.into()), "XYZ", 0);
        assert_eq!(view.value("Monthly EMI"), Some("1,000"));

        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["rows"][0]["label"], "Loan Amount");
    }
}
