pub mod calculator;
pub mod config;
pub mod currency;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod export;
pub mod input;
pub mod interest;
pub mod payments;
pub mod record;
pub mod store;
pub mod types;
pub mod views;

// re-export key types
pub use calculator::Calculator;
pub use config::{CalculatorConfig, DisplayConfig, StorageKeys, StoreConfig};
pub use currency::{convert_currency, find_currency, format_currency, Currency, CURRENCIES};
pub use decimal::{Money, Rate};
pub use errors::{CalcError, PersistenceError, Result};
pub use events::{EventStore, StoreEvent, StoredValue};
pub use export::{DocumentExporter, JsonExporter};
pub use input::{
    parse_and_validate, CalculationInput, EmiInput, InterestInput, RawEmiInput, RawInput,
    RawInterestInput,
};
pub use interest::{
    compute_interest, effective_annual_rate, CompoundingEngine, CompoundingFrequency,
    InterestResult,
};
pub use payments::{
    generate_schedule, compute_emi, AmortizationRow, AmortizationSchedule, AmortizationSummary,
    EmiResult, SchedulePage,
};
pub use record::{CalculationResult, Record};
pub use store::{JsonFileStorage, KeyValueStorage, MemoryStorage, Preferences, RecordStore};
pub use types::{CalculationKind, Collection, InterestMethod, RecordId, TenureUnit};
pub use views::{DetailRow, RecordView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
