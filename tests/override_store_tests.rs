use protech::location::{
    Fallback, LocationOverrideStore, LocationPatch, MemoryStorage, OverrideStorage, ResolvedLocation, StorageError,
};

fn detected() -> ResolvedLocation {
    let mut location = ResolvedLocation::mock();
    location.county = Some("Wayne County".to_string());
    location.matched_service_area = Some("Wayne County".to_string());
    location
}

fn city_patch(city: &str, region: &str) -> LocationPatch {
    LocationPatch {
        city: Some(city.to_string()),
        region: Some(region.to_string()),
        ..LocationPatch::default()
    }
}

/// Storage that refuses every write.
struct BrokenStorage;

impl OverrideStorage for BrokenStorage {
    fn load(&self) -> Option<String> {
        None
    }

    fn save(&mut self, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn test_override_merges_and_marks_user_asserted() {
    let mut store = LocationOverrideStore::open(detected(), MemoryStorage::new()).into_value();
    let outcome = store.override_location(city_patch("Columbus", "OH"));
    assert!(!outcome.is_degraded());

    let current = store.current();
    assert_eq!(current.city.as_deref(), Some("Columbus"));
    assert_eq!(current.country.as_deref(), Some("US"));
    assert_eq!(current.timezone.as_deref(), Some("America/New_York"));
    assert_eq!(current.county, None);
    assert_eq!(current.matched_service_area, None);
    assert!(!current.is_detected);
    assert!(store.has_override());
    assert!(store.storage().value().is_some());
}

#[test]
fn test_reset_restores_detected_after_many_overrides() {
    let original = detected();
    let mut store = LocationOverrideStore::open(original.clone(), MemoryStorage::new()).into_value();
    store.override_location(city_patch("Columbus", "OH"));
    store.override_location(city_patch("Pittsburgh", "PA"));
    store.override_location(LocationPatch {
        latitude: Some(1.0),
        longitude: Some(2.0),
        ..LocationPatch::default()
    });

    let outcome = store.reset();
    assert!(!outcome.is_degraded());
    assert_eq!(store.current(), &original);
    assert!(!store.has_override());
    assert_eq!(store.storage().value(), None);
}

#[test]
fn test_override_timestamp_increases() {
    let mut store = LocationOverrideStore::open(detected(), MemoryStorage::new()).into_value();
    let before = store.current().last_updated;
    store.override_location(city_patch("Columbus", "OH"));
    let first = store.current().last_updated;
    store.override_location(city_patch("Dayton", "OH"));
    assert!(first > before);
    assert!(store.current().last_updated > first);
}

#[test]
fn test_persisted_override_is_reloaded() {
    let mut store = LocationOverrideStore::open(detected(), MemoryStorage::new()).into_value();
    store.override_location(city_patch("Columbus", "OH"));
    let overridden = store.current().clone();
    let storage = store.into_storage();

    let reopened = LocationOverrideStore::open(detected(), storage);
    assert!(!reopened.is_degraded());
    let reopened = reopened.into_value();
    assert!(reopened.has_override());
    assert_eq!(reopened.current(), &overridden);
    assert!(reopened.detected().is_detected);
}

#[test]
fn test_failing_storage_still_updates_memory() {
    let mut store = LocationOverrideStore::open(detected(), BrokenStorage).into_value();
    let outcome = store.override_location(city_patch("Columbus", "OH"));
    assert!(matches!(outcome.fallback, Some(Fallback::StorageUnavailable { .. })));
    assert_eq!(outcome.value.city.as_deref(), Some("Columbus"));
    assert_eq!(store.current().city.as_deref(), Some("Columbus"));

    let outcome = store.reset();
    assert!(outcome.is_degraded());
    assert_eq!(store.current().city.as_deref(), Some("Orrville"));
}

#[test]
fn test_corrupt_stored_value_means_no_override() {
    let opened = LocationOverrideStore::open(detected(), MemoryStorage::with_value("{not json"));
    assert!(matches!(opened.fallback, Some(Fallback::CorruptOverride { .. })));
    let store = opened.into_value();
    assert!(!store.has_override());
    assert_eq!(store.current(), store.detected());
}

#[test]
fn test_blank_patch_fields_are_ignored() {
    let patch = LocationPatch {
        city: Some("   ".to_string()),
        region: Some(String::new()),
        ..LocationPatch::default()
    }
    .trimmed();
    assert!(patch.is_empty());
}
