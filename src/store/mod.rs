//! Persisted history, favorites and display preferences.
//!
//! The store reads its storage backend once in [`RecordStore::load`] and
//! from then on treats its in-memory copy as the source of truth. Every
//! mutation is mirrored back to the backend straight away. Storage problems
//! never reach the caller: they are logged, recorded as
//! [`StoreEvent::PersistenceFailed`] and the session carries on in memory.

pub mod backend;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::currency::find_currency;
use crate::errors::{CalcError, PersistenceError, Result};
use crate::events::{EventStore, StoreEvent, StoredValue};
use crate::record::{CalculationResult, Record};
use crate::types::{Collection, RecordId};

pub use backend::{JsonFileStorage, KeyValueStorage, MemoryStorage};

/// display preferences kept next to the records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub selected_currency: String,
}

impl Preferences {
    pub fn with_currency(code: &str) -> Self {
        Self {
            dark_mode: false,
            selected_currency: code.to_string(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::with_currency(crate::currency::BASE_CURRENCY)
    }
}

/// history and favorites, mirrored into a key-value storage backend
pub struct RecordStore<S: KeyValueStorage> {
    config: StoreConfig,
    storage: S,
    history: Vec<Record>,
    favorites: Vec<Record>,
    preferences: Preferences,
    last_id: Option<RecordId>,
    pub events: EventStore,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// load all persisted values; anything missing or malformed starts empty
    pub fn load(
        config: StoreConfig,
        default_currency: &str,
        storage: S,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        let now = time_provider.now();
        let mut events = EventStore::with_limit(config.event_limit);

        let mut history: Vec<Record> =
            read_value(&storage, &config.keys.history, StoredValue::History, now, &mut events)
                .unwrap_or_default();
        let favorites: Vec<Record> =
            read_value(&storage, &config.keys.favorites, StoredValue::Favorites, now, &mut events)
                .unwrap_or_default();
        let dark_mode: bool =
            read_value(&storage, &config.keys.dark_mode, StoredValue::DarkMode, now, &mut events)
                .unwrap_or(false);
        let selected_currency = read_currency(&storage, &config.keys.selected_currency, now, &mut events)
            .unwrap_or_else(|| default_currency.to_string());

        // a lowered limit applies to what was stored under the old one
        history.truncate(config.history_limit);

        let last_id = history.iter().chain(favorites.iter()).map(|r| r.id).max();

        tracing::debug!(
            history = history.len(),
            favorites = favorites.len(),
            dark_mode,
            currency = %selected_currency,
            "record store loaded"
        );
        events.emit(StoreEvent::StoreLoaded {
            history_len: history.len(),
            favorites_len: favorites.len(),
            timestamp: now,
        });

        Self {
            config,
            storage,
            history,
            favorites,
            preferences: Preferences {
                dark_mode,
                selected_currency,
            },
            last_id,
            events,
        }
    }

    /// write every value back to storage
    pub fn save(&mut self, time_provider: &SafeTimeProvider) {
        let now = time_provider.now();
        for target in [
            StoredValue::History,
            StoredValue::Favorites,
            StoredValue::DarkMode,
            StoredValue::SelectedCurrency,
        ] {
            self.persist(target, now);
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// give back the storage backend, e.g. to load it again
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn history(&self) -> &[Record] {
        &self.history
    }

    pub fn favorites(&self) -> &[Record] {
        &self.favorites
    }

    pub fn records(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::History => &self.history,
            Collection::Favorites => &self.favorites,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn get(&self, collection: Collection, id: RecordId) -> Option<&Record> {
        self.records(collection).iter().find(|r| r.id == id)
    }

    /// look in history first, then favorites
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.get(Collection::History, id)
            .or_else(|| self.get(Collection::Favorites, id))
    }

    /// record a result at the front of a collection
    ///
    /// history is truncated to its limit afterwards; the dropped entries are
    /// reported as a [`StoreEvent::HistoryEvicted`], never as an error.
    pub fn append(
        &mut self,
        collection: Collection,
        result: CalculationResult,
        time_provider: &SafeTimeProvider,
    ) -> Record {
        let now = time_provider.now();
        let id = RecordId::next_after(self.last_id, now.timestamp_millis());
        self.last_id = Some(id);

        let record = Record::new(id, now, result);
        let target = stored_value(collection);

        self.events.emit(StoreEvent::RecordAppended {
            target,
            id,
            kind: record.kind(),
            timestamp: now,
        });

        match collection {
            Collection::History => {
                self.history.insert(0, record.clone());
                if self.history.len() > self.config.history_limit {
                    let evicted: Vec<RecordId> = self
                        .history
                        .drain(self.config.history_limit..)
                        .map(|r| r.id)
                        .collect();
                    tracing::debug!(count = evicted.len(), "oldest history entries evicted");
                    self.events.emit(StoreEvent::HistoryEvicted {
                        ids: evicted,
                        timestamp: now,
                    });
                }
            }
            Collection::Favorites => {
                self.favorites.insert(0, record.clone());
            }
        }

        tracing::debug!(%id, kind = ?record.kind(), ?collection, "record appended");
        self.persist(target, now);
        record
    }

    /// copy an existing record into favorites under a fresh id
    pub fn favorite_existing(&mut self, record: &Record, time_provider: &SafeTimeProvider) -> Record {
        self.append(Collection::Favorites, record.result.clone(), time_provider)
    }

    /// delete by id; an absent id is not an error
    pub fn remove(
        &mut self,
        collection: Collection,
        id: RecordId,
        time_provider: &SafeTimeProvider,
    ) -> Option<Record> {
        let records = match collection {
            Collection::History => &mut self.history,
            Collection::Favorites => &mut self.favorites,
        };
        let position = records.iter().position(|r| r.id == id)?;
        let removed = records.remove(position);

        let now = time_provider.now();
        let target = stored_value(collection);
        self.events.emit(StoreEvent::RecordRemoved {
            target,
            id,
            timestamp: now,
        });
        self.persist(target, now);
        Some(removed)
    }

    /// empty a collection and drop its key, returning how many records it held
    pub fn clear(&mut self, collection: Collection, time_provider: &SafeTimeProvider) -> usize {
        let removed = match collection {
            Collection::History => std::mem::take(&mut self.history).len(),
            Collection::Favorites => std::mem::take(&mut self.favorites).len(),
        };

        let now = time_provider.now();
        let target = stored_value(collection);
        self.events.emit(StoreEvent::CollectionCleared {
            target,
            removed,
            timestamp: now,
        });

        let key = self.key_for(target).to_string();
        if let Err(e) = self.storage.remove(&key) {
            self.report_write_failure(target, &e, now);
        }
        removed
    }

    pub fn set_dark_mode(&mut self, enabled: bool, time_provider: &SafeTimeProvider) {
        self.preferences.dark_mode = enabled;
        let now = time_provider.now();
        self.events.emit(StoreEvent::PreferenceChanged {
            target: StoredValue::DarkMode,
            value: enabled.to_string(),
            timestamp: now,
        });
        self.persist(StoredValue::DarkMode, now);
    }

    /// flip dark mode, returning the new setting
    pub fn toggle_dark_mode(&mut self, time_provider: &SafeTimeProvider) -> bool {
        let enabled = !self.preferences.dark_mode;
        self.set_dark_mode(enabled, time_provider);
        enabled
    }

    /// select a display currency from the currency table
    pub fn set_selected_currency(&mut self, code: &str, time_provider: &SafeTimeProvider) -> Result<()> {
        let currency = find_currency(code).ok_or_else(|| CalcError::UnknownCurrency {
            code: code.to_string(),
        })?;
        self.preferences.selected_currency = currency.code.to_string();

        let now = time_provider.now();
        self.events.emit(StoreEvent::PreferenceChanged {
            target: StoredValue::SelectedCurrency,
            value: currency.code.to_string(),
            timestamp: now,
        });
        self.persist(StoredValue::SelectedCurrency, now);
        Ok(())
    }

    /// best-effort write of one value
    fn persist(&mut self, target: StoredValue, now: DateTime<Utc>) {
        if let Err(e) = self.write_value(target) {
            self.report_write_failure(target, &e, now);
        }
    }

    fn report_write_failure(&mut self, target: StoredValue, error: &PersistenceError, now: DateTime<Utc>) {
        tracing::warn!(?target, error = %error, "failed to persist value, keeping in-memory state");
        self.events.emit(StoreEvent::PersistenceFailed {
            target,
            reason: error.to_string(),
            timestamp: now,
        });
    }

    fn key_for(&self, target: StoredValue) -> &str {
        let keys = &self.config.keys;
        match target {
            StoredValue::History => keys.history.as_str(),
            StoredValue::Favorites => keys.favorites.as_str(),
            StoredValue::DarkMode => keys.dark_mode.as_str(),
            StoredValue::SelectedCurrency => keys.selected_currency.as_str(),
        }
    }

    fn write_value(&mut self, target: StoredValue) -> std::result::Result<(), PersistenceError> {
        let json = match target {
            StoredValue::History => serde_json::to_string(&self.history)?,
            StoredValue::Favorites => serde_json::to_string(&self.favorites)?,
            StoredValue::DarkMode => serde_json::to_string(&self.preferences.dark_mode)?,
            StoredValue::SelectedCurrency => serde_json::to_string(&self.preferences.selected_currency)?,
        };
        let key = self.key_for(target).to_string();
        self.storage.set(&key, &json)
    }
}

fn stored_value(collection: Collection) -> StoredValue {
    match collection {
        Collection::History => StoredValue::History,
        Collection::Favorites => StoredValue::Favorites,
    }
}

/// read and decode one key; failures are logged and reported as `None`
fn read_value<S, T>(
    storage: &S,
    key: &str,
    target: StoredValue,
    now: DateTime<Utc>,
    events: &mut EventStore,
) -> Option<T>
where
    S: KeyValueStorage,
    T: DeserializeOwned,
{
    let decoded = storage
        .get(key)
        .and_then(|raw| raw.map(|text| serde_json::from_str::<T>(&text)).transpose().map_err(Into::into));

    match decoded {
        Ok(value) => value,
        Err(e) => {
            report_load_failure(target, key, &e, now, events);
            None
        }
    }
}

/// the currency may be stored json-encoded or as a bare code
fn read_currency<S: KeyValueStorage>(
    storage: &S,
    key: &str,
    now: DateTime<Utc>,
    events: &mut EventStore,
) -> Option<String> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            report_load_failure(StoredValue::SelectedCurrency, key, &e, now, events);
            return None;
        }
    };

    let code = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
    match find_currency(&code) {
        Some(currency) => Some(currency.code.to_string()),
        None => {
            tracing::warn!(key, code = %code, "ignoring unknown stored currency");
            events.emit(StoreEvent::PersistenceFailed {
                target: StoredValue::SelectedCurrency,
                reason: format!("unknown currency {code:?}"),
                timestamp: now,
            });
            None
        }
    }
}

fn report_load_failure(
    target: StoredValue,
    key: &str,
    error: &PersistenceError,
    now: DateTime<Utc>,
    events: &mut EventStore,
) {
    tracing::warn!(key, error = %error, "ignoring unreadable stored value");
    events.emit(StoreEvent::PersistenceFailed {
        target,
        reason: error.to_string(),
        timestamp: now,
    });
}
