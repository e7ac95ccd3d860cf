use serde::{Deserialize, Serialize};

use crate::currency::find_currency;
use crate::errors::{CalcError, Result};

/// default number of history entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// default number of undrained store events kept
pub const DEFAULT_EVENT_LIMIT: usize = 256;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorConfig {
    pub store: StoreConfig,
    pub display: DisplayConfig,
}

/// persistence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// maximum history entries, oldest dropped beyond this
    pub history_limit: usize,
    /// undrained store events kept, oldest dropped beyond this
    pub event_limit: usize,
    pub keys: StorageKeys,
}

/// key names used in the key-value storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub dark_mode: String,
    pub history: String,
    pub favorites: String,
    pub selected_currency: String,
}

/// display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_currency: String,
    /// decimal places shown for amounts
    pub precision: u32,
    /// amortization rows per page
    pub schedule_page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            event_limit: DEFAULT_EVENT_LIMIT,
            keys: StorageKeys::default(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            dark_mode: "darkMode".to_string(),
            history: "calculationHistory".to_string(),
            favorites: "favorites".to_string(),
            selected_currency: "selectedCurrency".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_currency: "INR".to_string(),
            precision: 2,
            schedule_page_size: 12,
        }
    }
}

impl StoreConfig {
    /// store config keeping `history_limit` entries
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            history_limit,
            ..Self::default()
        }
    }
}

impl StorageKeys {
    /// all keys prefixed, for sharing one backend between profiles
    pub fn prefixed(prefix: &str) -> Self {
        let base = Self::default();
        Self {
            dark_mode: format!("{prefix}{}", base.dark_mode),
            history: format!("{prefix}{}", base.history),
            favorites: format!("{prefix}{}", base.favorites),
            selected_currency: format!("{prefix}{}", base.selected_currency),
        }
    }
}

impl CalculatorConfig {
    /// parse from json; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| CalcError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.history_limit == 0 {
            return Err(CalcError::InvalidConfiguration {
                message: "history limit must be at least 1".to_string(),
            });
        }
        if self.store.event_limit == 0 {
            return Err(CalcError::InvalidConfiguration {
                message: "event limit must be at least 1".to_string(),
            });
        }
        if self.display.schedule_page_size == 0 {
            return Err(CalcError::InvalidConfiguration {
                message: "schedule page size must be at least 1".to_string(),
            });
        }
        let keys = &self.store.keys;
        let names = [&keys.dark_mode, &keys.history, &keys.favorites, &keys.selected_currency];
        if names.iter().any(|k| k.is_empty()) {
            return Err(CalcError::InvalidConfiguration {
                message: "storage keys must not be empty".to_string(),
            });
        }
        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                return Err(CalcError::InvalidConfiguration {
                    message: format!("storage key {a:?} is used twice"),
                });
            }
        }
        if find_currency(&self.display.default_currency).is_none() {
            return Err(CalcError::UnknownCurrency {
                code: self.display.default_currency.clone(),
            });
        }
        Ok(())
    }
}
