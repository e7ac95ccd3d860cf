use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::input::check_payment_count;
use crate::payments::emi::EmiResult;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub payment_index: u32,
    pub installment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// balance after this payment, never below zero
    pub remaining_balance: Money,
}

/// month-by-month split of a fixed installment into principal and interest
///
/// pure function of its inputs; produces exactly `payment_count` rows.
pub fn generate_schedule(
    principal: Money,
    emi: Money,
    annual_rate_percent: Decimal,
    payment_count: u32,
) -> Vec<AmortizationRow> {
    let monthly_rate = Rate::from_percent(annual_rate_percent).monthly_rate().as_decimal();

    let mut rows = Vec::with_capacity(payment_count as usize);
    let mut balance = principal;

    for i in 1..=payment_count {
        let interest_portion = balance * monthly_rate;
        let principal_portion = emi - interest_portion;

        // absorbs drift in the final period
        balance = (balance - principal_portion).max(Money::ZERO);

        rows.push(AmortizationRow {
            payment_index: i,
            installment: emi,
            principal_portion,
            interest_portion,
            remaining_balance: balance,
        });
    }

    rows
}

/// totals over a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub total_payments: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// one page of schedule rows
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePage<'a> {
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    pub rows: &'a [AmortizationRow],
}

impl SchedulePage<'_> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// amortization schedule generated from an emi result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub installment: Money,
    pub annual_rate: Rate,
    pub payment_count: u32,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(principal: Money, emi: Money, annual_rate: Rate, payment_count: u32) -> Self {
        let rows = generate_schedule(principal, emi, annual_rate.as_percentage(), payment_count);
        Self {
            principal,
            installment: emi,
            annual_rate,
            payment_count,
            rows,
        }
    }

    /// schedule for an emi result; stored results are re-checked so a
    /// tampered payment count cannot size the schedule
    pub fn from_emi(result: &EmiResult) -> Result<Self> {
        let payment_count = check_payment_count(result.payment_count)?;
        Ok(Self::generate(
            result.principal,
            result.monthly_installment,
            result.annual_rate,
            payment_count,
        ))
    }

    /// get row for a specific payment number
    pub fn row(&self, payment_index: u32) -> Option<&AmortizationRow> {
        let idx = payment_index.checked_sub(1)?;
        self.rows.get(idx as usize)
    }

    /// remaining balance after a payment
    pub fn balance_after_payment(&self, payment_index: u32) -> Money {
        self.row(payment_index)
            .map(|r| r.remaining_balance)
            .unwrap_or(self.principal)
    }

    pub fn summary(&self) -> AmortizationSummary {
        AmortizationSummary {
            total_payments: self.installment * Decimal::from(self.payment_count),
            total_interest: self.rows.iter().map(|r| r.interest_portion).sum(),
            total_principal: self.rows.iter().map(|r| r.principal_portion).sum(),
        }
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.rows.len().div_ceil(page_size)
    }

    /// rows on a 1-based page; out of range pages are clamped to the nearest
    /// valid one
    pub fn page(&self, page: usize, page_size: usize) -> SchedulePage<'_> {
        let total_pages = self.page_count(page_size);
        if total_pages == 0 {
            return SchedulePage {
                page: 1,
                total_pages: 0,
                rows: &[],
            };
        }

        let page = page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(self.rows.len());
        SchedulePage {
            page,
            total_pages,
            rows: &self.rows[start..end],
        }
    }
}
