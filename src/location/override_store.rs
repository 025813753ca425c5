use serde::Deserialize;
use thiserror::Error;

use super::outcome::{Fallback, Outcome};
use super::resolver::{now_millis, ResolvedLocation};

/// Key the override is stored under (cookie name on the web side).
pub const LOCATION_OVERRIDE_KEY: &str = "location-override";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available: {0}")]
    Unavailable(String),

    #[error("value of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("could not serialize override: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a visitor's override is persisted between page loads.
pub trait OverrideStorage {
    /// Raw stored value, if any.
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process storage. Used by the CLI and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    value: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl OverrideStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.value = None;
        Ok(())
    }
}

/// Fields a visitor may pin. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationPatch {
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationPatch {
    /// Drop blank strings so an empty form field does not erase a value.
    pub fn trimmed(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            country: keep(self.country),
            city: keep(self.city),
            region: keep(self.region),
            timezone: keep(self.timezone),
            continent: keep(self.continent),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A visitor's location state: the detected record plus an optional
/// user-pinned override on top of it.
pub struct LocationOverrideStore<S: OverrideStorage> {
    detected: ResolvedLocation,
    current: ResolvedLocation,
    has_override: bool,
    storage: S,
}

impl<S: OverrideStorage> LocationOverrideStore<S> {
    /// Start from the detected record and apply a persisted override if one
    /// parses. A corrupt stored value counts as no override.
    pub fn open(detected: ResolvedLocation, storage: S) -> Outcome<Self> {
        let stored = storage.load();
        let mut store = Self {
            current: detected.clone(),
            detected,
            has_override: false,
            storage,
        };
        let Some(raw) = stored else {
            return Outcome::clean(store);
        };
        match serde_json::from_str::<ResolvedLocation>(&raw) {
            Ok(saved) => {
                store.current = saved;
                store.has_override = true;
                Outcome::clean(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable location override");
                Outcome::degraded(store, Fallback::CorruptOverride { reason: e.to_string() })
            }
        }
    }

    pub fn current(&self) -> &ResolvedLocation {
        &self.current
    }

    pub fn detected(&self) -> &ResolvedLocation {
        &self.detected
    }

    pub fn has_override(&self) -> bool {
        self.has_override
    }

    /// Merge `patch` onto the current location and persist it.
    ///
    /// The result is user-asserted, so `is_detected` is cleared. The
    /// in-memory state changes even when persisting fails.
    pub fn override_location(&mut self, patch: LocationPatch) -> Outcome<&ResolvedLocation> {
        let mut updated = self.current.clone();
        if let Some(country) = patch.country {
            updated.country = Some(country);
        }
        if let Some(city) = patch.city {
            updated.city = Some(city);
            // A pinned city no longer belongs to the matched area.
            updated.county = None;
            updated.matched_service_area = None;
        }
        if let Some(region) = patch.region {
            updated.region = Some(region);
        }
        if let Some(timezone) = patch.timezone {
            updated.timezone = Some(timezone);
        }
        if let Some(continent) = patch.continent {
            updated.continent = Some(continent);
        }
        if let Some(latitude) = patch.latitude {
            updated.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            updated.longitude = Some(longitude);
        }
        updated.is_detected = false;
        updated.last_updated = now_millis().max(self.current.last_updated + 1);

        self.current = updated;
        self.has_override = true;

        let persisted = serde_json::to_string(&self.current)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.save(&json));
        let fallback = persisted.err().map(|e| {
            tracing::warn!(error = %e, "could not persist location override");
            Fallback::StorageUnavailable { reason: e.to_string() }
        });
        Outcome {
            value: &self.current,
            fallback,
        }
    }

    /// Discard the override and return to the detected location.
    pub fn reset(&mut self) -> Outcome<&ResolvedLocation> {
        self.current = self.detected.clone();
        self.has_override = false;
        let fallback = self.storage.clear().err().map(|e| {
            tracing::warn!(error = %e, "could not clear location override");
            Fallback::StorageUnavailable { reason: e.to_string() }
        });
        Outcome {
            value: &self.current,
            fallback,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
