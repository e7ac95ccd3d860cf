/// quick start - one interest and one emi calculation
use interest_calc_rs::{Calculator, CalculatorConfig, MemoryStorage, RawEmiInput, RawInterestInput, RecordView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut calc = Calculator::new(
        CalculatorConfig::default(),
        MemoryStorage::new(),
        &interest_calc_rs::SafeTimeProvider::new(interest_calc_rs::TimeSource::System),
    )?;

    // 10,000 at 12% compounded monthly for a year
    let interest = calc.calculate_interest_now(&RawInterestInput::new(
        "10000", "12", "1", "monthly", "compound",
    ))?;

    // 5 lakh loan at 10% over 5 years
    let emi = calc.calculate_emi_now(&RawEmiInput::new("500000", "10", "5", "years"))?;

    for record in [&interest, &emi] {
        let view = RecordView::from_record(record, "INR");
        println!("=== {} ===", view.kind);
        for row in &view.rows {
            println!("{:>22}: {}", row.label, row.value);
        }
        println!();
    }

    Ok(())
}
