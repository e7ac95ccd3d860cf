use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::interest::InterestResult;
use crate::payments::{AmortizationSchedule, EmiResult};
use crate::types::{CalculationKind, RecordId};

/// result of either calculator, tagged by kind when persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalculationResult {
    Interest(InterestResult),
    Emi(EmiResult),
}

impl CalculationResult {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationResult::Interest(_) => CalculationKind::Interest,
            CalculationResult::Emi(_) => CalculationKind::Emi,
        }
    }

    pub fn principal(&self) -> Money {
        match self {
            CalculationResult::Interest(r) => r.principal,
            CalculationResult::Emi(r) => r.principal,
        }
    }

    /// total amount at the end: principal plus interest, or total repaid
    pub fn total_amount(&self) -> Money {
        match self {
            CalculationResult::Interest(r) => r.total_amount,
            CalculationResult::Emi(r) => r.total_amount_paid,
        }
    }

    pub fn interest(&self) -> Money {
        match self {
            CalculationResult::Interest(r) => r.interest_earned,
            CalculationResult::Emi(r) => r.total_interest_paid,
        }
    }

    pub fn as_emi(&self) -> Option<&EmiResult> {
        match self {
            CalculationResult::Emi(r) => Some(r),
            CalculationResult::Interest(_) => None,
        }
    }
}

impl From<InterestResult> for CalculationResult {
    fn from(r: InterestResult) -> Self {
        CalculationResult::Interest(r)
    }
}

impl From<EmiResult> for CalculationResult {
    fn from(r: EmiResult) -> Self {
        CalculationResult::Emi(r)
    }
}

/// persisted snapshot of one completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    pub result: CalculationResult,
}

impl Record {
    pub fn new(id: RecordId, timestamp: DateTime<Utc>, result: CalculationResult) -> Self {
        Self { id, timestamp, result }
    }

    pub fn kind(&self) -> CalculationKind {
        self.result.kind()
    }

    /// display timestamp, e.g. "2024-01-31 14:05:09 UTC"
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// amortization schedule, generated on demand for valid emi records
    pub fn schedule(&self) -> Option<AmortizationSchedule> {
        self.result
            .as_emi()
            .and_then(|emi| AmortizationSchedule::from_emi(emi).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::{compute_interest, CompoundingFrequency};
    use crate::payments::compute_emi;
    use crate::types::{InterestMethod, TenureUnit};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn interest_record() -> Record {
        let result = compute_interest(
            Money::from_major(10_000),
            dec!(5),
            dec!(2),
            CompoundingFrequency::Yearly,
            InterestMethod::Simple,
        )
        .unwrap();
        Record::new(
            RecordId::new(1_704_067_200_000),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            result.into(),
        )
    }

    #[test]
    fn test_kind_discriminator_in_json() {
        let record = interest_record();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["result"]["kind"], "interest");
        assert_eq!(value["result"]["method"], "simple");
        assert_eq!(value["id"], 1_704_067_200_000_i64);
    }

    #[test]
    fn test_json_round_trip() {
        let emi = compute_emi(Money::from_major(250_000), dec!(9), dec!(3), TenureUnit::Years).unwrap();
        let record = Record::new(
            RecordId::new(5),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            emi.into(),
        );

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.kind(), CalculationKind::Emi);
    }

    #[test]
    fn test_schedule_only_for_emi() {
        assert!(interest_record().schedule().is_none());

        let emi = compute_emi(Money::from_major(12_000), dec!(12), dec!(12), TenureUnit::Months).unwrap();
        let record = Record::new(RecordId::new(9), Utc::now(), emi.into());
        assert_eq!(record.schedule().unwrap().rows.len(), 12);
    }

    #[test]
    fn test_stored_payment_count_is_rechecked() {
        let emi = compute_emi(Money::from_major(12_000), dec!(0), dec!(12), TenureUnit::Months).unwrap();
        let mut json = serde_json::to_value(Record::new(RecordId::new(3), Utc::now(), emi.into())).unwrap();
        json["result"]["payment_count"] = serde_json::json!(4_000_000_000_u32);

        let tampered: Record = serde_json::from_value(json).unwrap();
        assert!(tampered.schedule().is_none());
    }

    #[test]
    fn test_accessors() {
        let record = interest_record();
        assert_eq!(record.result.principal(), Money::from_major(10_000));
        assert_eq!(record.result.interest(), Money::from_major(1_000));
        assert_eq!(record.result.total_amount(), Money::from_major(11_000));
        assert_eq!(record.display_timestamp(), "2024-01-01 00:00:00 UTC");
    }
}
