//! Visitor location: edge signals, resolution against service areas, the
//! visitor's own override, and the slug form used in URLs.
//!
//! ```
//! use protech::location::{resolve, LocationSignal, Runtime};
//!
//! let signal = LocationSignal::default();
//! let resolved = resolve(&signal, &[], Runtime::Live);
//! assert!(!resolved.is_detected);
//! assert_eq!(resolved.city.as_deref(), Some("Unknown Location"));
//! ```

pub mod outcome;
pub mod override_store;
pub mod resolver;
pub mod signal;
pub mod slug;

pub use outcome::{Fallback, Outcome};
pub use override_store::{
    LocationOverrideStore, LocationPatch, MemoryStorage, OverrideStorage, StorageError, LOCATION_OVERRIDE_KEY,
};
pub use resolver::{resolve, ResolvedLocation, Runtime, UNKNOWN_LOCATION};
pub use signal::LocationSignal;
pub use slug::{to_display_name, to_slug, DEFAULT_FALLBACK_SLUG};

/// Slug for a resolved location, used in call-to-action links.
pub fn location_slug(location: &ResolvedLocation) -> String {
    let fallback = slug::hyphenate(&location.display_location());
    let fallback = if fallback.is_empty() { DEFAULT_FALLBACK_SLUG } else { fallback.as_str() };
    to_slug(location.known_city(), location.region.as_deref(), fallback)
}
