/// amortization - paginated schedule for an emi loan
use interest_calc_rs::{compute_emi, currency::format_currency, AmortizationSchedule, Decimal, Money, TenureUnit};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== amortization example ===\n");

    let emi = compute_emi(Money::from_major(500_000), Decimal::from(10), Decimal::from(5), TenureUnit::Years)?;
    println!("monthly emi: {}", format_currency(emi.monthly_installment, "INR"));
    println!("total interest: {}", format_currency(emi.total_interest_paid, "INR"));
    println!("total paid: {}\n", format_currency(emi.total_amount_paid, "INR"));

    let schedule = AmortizationSchedule::from_emi(&emi)?;
    let page_size = 12;

    for page_number in 1..=schedule.page_count(page_size) {
        let page = schedule.page(page_number, page_size);
        println!("--- year {} of {} ---", page.page, page.total_pages);
        for row in page.rows {
            println!(
                "{:>3}  principal {:>12}  interest {:>11}  balance {:>14}",
                row.payment_index,
                format_currency(row.principal_portion, "INR"),
                format_currency(row.interest_portion, "INR"),
                format_currency(row.remaining_balance, "INR"),
            );
        }
    }

    let summary = schedule.summary();
    println!("\nprincipal repaid: {}", format_currency(summary.total_principal, "INR"));
    println!("interest paid: {}", format_currency(summary.total_interest, "INR"));

    Ok(())
}
