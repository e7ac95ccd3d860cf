use hourglass_rs::SafeTimeProvider;

use crate::config::CalculatorConfig;
use crate::errors::{CalcError, Result};
use crate::events::StoreEvent;
use crate::export::DocumentExporter;
use crate::input::{parse_and_validate, parse_emi, parse_interest, CalculationInput, RawEmiInput, RawInput, RawInterestInput};
use crate::interest::compute_interest_for;
use crate::payments::{compute_emi_for, AmortizationSchedule};
use crate::record::{CalculationResult, Record};
use crate::store::{KeyValueStorage, RecordStore};
use crate::types::{Collection, RecordId};
use crate::views::RecordView;

/// calculator session: validates input, computes, records history
pub struct Calculator<S: KeyValueStorage> {
    config: CalculatorConfig,
    store: RecordStore<S>,
}

impl<S: KeyValueStorage> Calculator<S> {
    /// validate the config and load persisted state from `storage`
    pub fn new(config: CalculatorConfig, storage: S, time_provider: &SafeTimeProvider) -> Result<Self> {
        config.validate()?;
        let store = RecordStore::load(
            config.store.clone(),
            &config.display.default_currency,
            storage,
            time_provider,
        );
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    pub fn into_store(self) -> RecordStore<S> {
        self.store
    }

    pub fn history(&self) -> &[Record] {
        self.store.history()
    }

    pub fn favorites(&self) -> &[Record] {
        self.store.favorites()
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.store.events.take_events()
    }

    /// calculate interest and record it in history
    pub fn calculate_interest(
        &mut self,
        form: &RawInterestInput,
        time_provider: &SafeTimeProvider,
    ) -> Result<Record> {
        let input = parse_interest(form)?;
        let result = compute_interest_for(&input)?;
        Ok(self.store.append(Collection::History, result.into(), time_provider))
    }

    pub fn calculate_interest_now(&mut self, form: &RawInterestInput) -> Result<Record> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.calculate_interest(form, &time)
    }

    /// calculate an emi and record it in history
    pub fn calculate_emi(&mut self, form: &RawEmiInput, time_provider: &SafeTimeProvider) -> Result<Record> {
        let input = parse_emi(form)?;
        let result = compute_emi_for(&input)?;
        Ok(self.store.append(Collection::History, result.into(), time_provider))
    }

    pub fn calculate_emi_now(&mut self, form: &RawEmiInput) -> Result<Record> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.calculate_emi(form, &time)
    }

    /// calculate whichever form was submitted
    pub fn calculate(&mut self, form: &RawInput, time_provider: &SafeTimeProvider) -> Result<Record> {
        let result: CalculationResult = match parse_and_validate(form)? {
            CalculationInput::Interest(input) => compute_interest_for(&input)?.into(),
            CalculationInput::Emi(input) => compute_emi_for(&input)?.into(),
        };
        Ok(self.store.append(Collection::History, result, time_provider))
    }

    /// save a history record to favorites under a new id
    pub fn favorite(&mut self, id: RecordId, time_provider: &SafeTimeProvider) -> Result<Record> {
        let record = self
            .store
            .get(Collection::History, id)
            .cloned()
            .ok_or(CalcError::RecordNotFound { id })?;
        Ok(self.store.favorite_existing(&record, time_provider))
    }

    pub fn record(&self, id: RecordId) -> Result<&Record> {
        self.store.find(id).ok_or(CalcError::RecordNotFound { id })
    }

    /// amortization schedule of an emi record from either collection
    pub fn schedule(&self, id: RecordId) -> Result<AmortizationSchedule> {
        let record = self.record(id)?;
        let emi = record.result.as_emi().ok_or(CalcError::NotAnEmiRecord { id })?;
        AmortizationSchedule::from_emi(emi)
    }

    /// display view in the selected currency
    pub fn view(&self, id: RecordId) -> Result<RecordView> {
        let record = self.record(id)?;
        Ok(RecordView::from_record_dp(
            record,
            &self.store.preferences().selected_currency,
            self.config.display.precision,
        ))
    }

    /// hand a record and its view to an exporter
    pub fn export(&self, id: RecordId, exporter: &mut dyn DocumentExporter) -> Result<()> {
        let record = self.record(id)?;
        let view = self.view(id)?;
        exporter.export(record, &view)
    }

    pub fn schedule_page_size(&self) -> usize {
        self.config.display.schedule_page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::export::JsonExporter;
    use crate::store::MemoryStorage;
    use crate::types::CalculationKind;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()))
    }

    fn calculator(time: &SafeTimeProvider) -> Calculator<MemoryStorage> {
        Calculator::new(CalculatorConfig::default(), MemoryStorage::new(), time).unwrap()
    }

    fn reference_loan() -> RawEmiInput {
        RawEmiInput::new("500000", "10", "5", "years")
    }

    #[test]
    fn test_emi_recorded_in_history() {
        let time = test_time();
        let mut calc = calculator(&time);

        let record = calc.calculate_emi(&reference_loan(), &time).unwrap();

        assert_eq!(record.kind(), CalculationKind::Emi);
        assert_eq!(record.timestamp, time.now());
        assert_eq!(calc.history(), &[record.clone()]);

        let emi = record.result.as_emi().unwrap();
        assert_eq!(emi.monthly_installment.round_dp(2), Money::from_str_exact("10623.52").unwrap());
    }

    #[test]
    fn test_invalid_form_leaves_history_untouched() {
        let time = test_time();
        let mut calc = calculator(&time);

        let err = calc
            .calculate_interest(&RawInterestInput::new("", "5", "1", "yearly", "simple"), &time)
            .unwrap_err();
        assert!(matches!(err, CalcError::MissingField { .. }));

        let err = calc
            .calculate_emi(&RawEmiInput::new("1000", "abc", "1", "years"), &time)
            .unwrap_err();
        assert!(err.is_invalid_input());

        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_calculate_dispatch() {
        let time = test_time();
        let mut calc = calculator(&time);

        let interest = calc
            .calculate(
                &RawInput::Interest(RawInterestInput::new("10000", "5", "2", "yearly", "simple")),
                &time,
            )
            .unwrap();
        let emi = calc.calculate(&RawInput::Emi(reference_loan()), &time).unwrap();

        assert_eq!(interest.result.interest(), Money::from_major(1_000));
        assert_eq!(emi.kind(), CalculationKind::Emi);
        assert_eq!(calc.history()[0].id, emi.id);
    }

    #[test]
    fn test_favorite_and_schedule() {
        let time = test_time();
        let control = time.test_control().unwrap();
        let mut calc = calculator(&time);

        let interest = calc
            .calculate_interest(&RawInterestInput::new("5000", "7", "3", "quarterly", "compound"), &time)
            .unwrap();
        control.advance(Duration::seconds(30));
        let emi = calc.calculate_emi(&reference_loan(), &time).unwrap();

        let favorite = calc.favorite(emi.id, &time).unwrap();
        assert_eq!(calc.favorites(), &[favorite.clone()]);

        let schedule = calc.schedule(favorite.id).unwrap();
        assert_eq!(schedule.rows.len(), 60);
        assert_eq!(schedule.page_count(calc.schedule_page_size()), 5);

        assert!(matches!(calc.schedule(interest.id), Err(CalcError::NotAnEmiRecord { .. })));
        assert!(matches!(
            calc.favorite(RecordId::new(1), &time),
            Err(CalcError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_view_uses_selected_currency() {
        let time = test_time();
        let mut calc = calculator(&time);
        let record = calc.calculate_emi(&reference_loan(), &time).unwrap();

        assert_eq!(calc.view(record.id).unwrap().value("Monthly EMI"), Some("₹10,623.52"));

        calc.store_mut().set_selected_currency("USD", &time).unwrap();
        assert_eq!(calc.view(record.id).unwrap().value("Monthly EMI"), Some("$10,623.52"));
    }

    #[test]
    fn test_export() {
        let time = test_time();
        let mut calc = calculator(&time);
        let record = calc.calculate_emi(&reference_loan(), &time).unwrap();

        let mut exporter = JsonExporter::new(Vec::new());
        calc.export(record.id, &mut exporter).unwrap();
        assert_eq!(exporter.exported(), 1);

        let err = calc.export(RecordId::new(3), &mut exporter).unwrap_err();
        assert!(matches!(err, CalcError::RecordNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let time = test_time();
        let mut config = CalculatorConfig::default();
        config.store.history_limit = 0;

        assert!(Calculator::new(config, MemoryStorage::new(), &time).is_err());
    }

    #[test]
    fn test_session_survives_reload() {
        let time = test_time();
        let mut calc = calculator(&time);
        let record = calc.calculate_emi(&reference_loan(), &time).unwrap();
        calc.favorite(record.id, &time).unwrap();

        let storage = calc.into_store().into_storage();
        let reloaded = Calculator::new(CalculatorConfig::default(), storage, &time).unwrap();

        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.favorites().len(), 1);
        assert_eq!(reloaded.record(record.id).unwrap(), &record);
    }
}
