use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CalculationKind, RecordId};

/// which stored value an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredValue {
    History,
    Favorites,
    DarkMode,
    SelectedCurrency,
}

/// all events emitted by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    // lifecycle
    StoreLoaded {
        history_len: usize,
        favorites_len: usize,
        timestamp: DateTime<Utc>,
    },

    // collection changes
    RecordAppended {
        target: StoredValue,
        id: RecordId,
        kind: CalculationKind,
        timestamp: DateTime<Utc>,
    },
    HistoryEvicted {
        ids: Vec<RecordId>,
        timestamp: DateTime<Utc>,
    },
    RecordRemoved {
        target: StoredValue,
        id: RecordId,
        timestamp: DateTime<Utc>,
    },
    CollectionCleared {
        target: StoredValue,
        removed: usize,
        timestamp: DateTime<Utc>,
    },

    // preferences
    PreferenceChanged {
        target: StoredValue,
        value: String,
        timestamp: DateTime<Utc>,
    },

    // storage
    PersistenceFailed {
        target: StoredValue,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
///
/// with a limit set, the oldest events are dropped once it is reached;
/// callers that need every event drain with [`EventStore::take_events`].
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<StoreEvent>,
    limit: Option<usize>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            limit: None,
        }
    }

    /// store keeping at most `limit` undrained events
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
        if let Some(limit) = self.limit {
            if self.events.len() > limit {
                let excess = self.events.len() - limit;
                self.events.drain(..excess);
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
