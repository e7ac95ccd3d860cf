/// history store - persisted history and favorites in a json file
use chrono::{Duration, TimeZone, Utc};
use interest_calc_rs::{
    Calculator, CalculatorConfig, JsonFileStorage, RawEmiInput, RawInterestInput, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== history store example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()));
    let controller = time.test_control().unwrap();

    let path = std::env::temp_dir().join("interest-calc-demo").join("store.json");
    let _ = std::fs::remove_file(&path);

    let mut calc = Calculator::new(CalculatorConfig::default(), JsonFileStorage::open(&path)?, &time)?;

    for years in 1..=3 {
        let years = years.to_string();
        calc.calculate_interest(&RawInterestInput::new("25000", "6.5", years.as_str(), "quarterly", "compound"), &time)?;
        controller.advance(Duration::minutes(1));
    }
    let loan = calc.calculate_emi(&RawEmiInput::new("1200000", "8.5", "240", "months"), &time)?;
    calc.favorite(loan.id, &time)?;
    calc.store_mut().set_selected_currency("USD", &time)?;

    println!("\nhistory:");
    for record in calc.history() {
        println!("  {} {:<8} total {}", record.display_timestamp(), record.kind().label(), record.result.total_amount().round_dp(2));
    }

    // load the same file again
    let storage = calc.into_store().into_storage();
    let reloaded = Calculator::new(CalculatorConfig::default(), JsonFileStorage::open(storage.path())?, &time)?;
    println!("\nreloaded {} history and {} favorites from {}", reloaded.history().len(), reloaded.favorites().len(), path.display());
    println!("selected currency: {}", reloaded.store().preferences().selected_currency);

    Ok(())
}
