use serde::{Deserialize, Serialize};

use crate::models::ServiceArea;

use super::signal::LocationSignal;

/// City shown when nothing about the visitor is known.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Where the resolver is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    /// Serving real visitors; edge headers are the only source of truth.
    #[default]
    Live,
    /// Static export or preview; no real signals exist, so the mock
    /// location stands in for them.
    Preview,
}

impl Runtime {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "live" | "production" => Some(Runtime::Live),
            "preview" | "build" | "static" => Some(Runtime::Preview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::Live => "live",
            Runtime::Preview => "preview",
        }
    }
}

/// Normalized location for one request (or one override).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub is_detected: bool,
    /// Milliseconds since the Unix epoch.
    pub last_updated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_service_area: Option<String>,
}

impl ResolvedLocation {
    /// Record returned when no identifying signal is present. Only the
    /// display placeholder is set.
    pub fn unknown() -> Self {
        Self {
            country: None,
            city: Some(UNKNOWN_LOCATION.to_string()),
            region: None,
            county: None,
            timezone: None,
            continent: None,
            latitude: None,
            longitude: None,
            is_detected: false,
            last_updated: now_millis(),
            matched_service_area: None,
        }
    }

    /// Fixed record used for static export and previews.
    pub fn mock() -> Self {
        Self {
            country: Some("US".to_string()),
            city: Some("Orrville".to_string()),
            region: Some("OH".to_string()),
            county: None,
            timezone: Some("America/New_York".to_string()),
            continent: Some("NA".to_string()),
            latitude: Some(40.8437),
            longitude: Some(-81.764),
            is_detected: true,
            last_updated: now_millis(),
            matched_service_area: None,
        }
    }

    /// The city if it is a real one, not the placeholder.
    pub fn known_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| *c != UNKNOWN_LOCATION)
    }

    /// Short label for headlines: `City, RC`, else the first known of
    /// city, region, country, else `your area`.
    pub fn display_location(&self) -> String {
        match (self.known_city(), self.region.as_deref()) {
            (Some(city), Some(region)) => format!("{}, {}", city, region),
            (Some(city), None) => city.to_string(),
            (None, Some(region)) => region.to_string(),
            (None, None) => self
                .country
                .clone()
                .unwrap_or_else(|| "your area".to_string()),
        }
    }

    /// Full label, e.g. `San Francisco, CA, US`.
    pub fn formatted_location(&self) -> String {
        let parts: Vec<&str> = [self.known_city(), self.region.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            parts.join(", ")
        }
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Turn raw edge signals into a [`ResolvedLocation`].
///
/// Never fails: missing data resolves to the placeholder record. Service
/// areas are only consulted for detected signals (country or city present)
/// and are tried in order, first by city (case-insensitive) and then by
/// zip; the first matching area supplies the canonical city and county.
pub fn resolve(signal: &LocationSignal, areas: &[ServiceArea], runtime: Runtime) -> ResolvedLocation {
    if runtime == Runtime::Preview {
        return attach_area(ResolvedLocation::mock(), None, areas);
    }

    if signal.is_anonymous() {
        tracing::debug!("no geolocation signal present, using placeholder location");
        return ResolvedLocation::unknown();
    }

    let is_detected = signal.country.is_some() || signal.city.is_some();
    if !is_detected {
        // Region alone is not an identifying signal: keep it, skip matching,
        // and leave every other geo field empty.
        tracing::debug!(region = ?signal.region, "region-only geolocation signal");
        return ResolvedLocation {
            region: signal.region.clone(),
            ..ResolvedLocation::unknown()
        };
    }

    let resolved = ResolvedLocation {
        country: signal.country.clone(),
        city: signal.city.clone(),
        region: signal.region.clone(),
        county: None,
        timezone: signal.timezone.clone(),
        continent: signal.continent.clone(),
        latitude: signal.latitude,
        longitude: signal.longitude,
        is_detected,
        last_updated: now_millis(),
        matched_service_area: None,
    };
    attach_area(resolved, signal.zip.as_deref(), areas)
}

fn attach_area(mut resolved: ResolvedLocation, zip: Option<&str>, areas: &[ServiceArea]) -> ResolvedLocation {
    let by_city = resolved
        .city
        .as_deref()
        .and_then(|city| areas.iter().find(|area| area.contains_city(city)));
    let matched = by_city.or_else(|| zip.and_then(|zip| areas.iter().find(|area| area.contains_zip(zip))));

    if let Some(area) = matched {
        tracing::debug!(area = %area.name, county = %area.county, "matched service area");
        resolved.city = Some(area.name.clone());
        resolved.county = Some(area.county.clone());
        resolved.matched_service_area = Some(area.county.clone());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_location_prefers_city_and_region() {
        let mut loc = ResolvedLocation::mock();
        assert_eq!(loc.display_location(), "Orrville, OH");
        loc.region = None;
        assert_eq!(loc.display_location(), "Orrville");
        loc.city = None;
        assert_eq!(loc.display_location(), "US");
    }

    #[test]
    fn placeholder_is_not_shown_as_a_city() {
        let loc = ResolvedLocation::unknown();
        assert_eq!(loc.display_location(), "your area");
        assert_eq!(loc.formatted_location(), UNKNOWN_LOCATION);
    }

    #[test]
    fn runtime_parse_accepts_aliases() {
        assert_eq!(Runtime::parse("Preview"), Some(Runtime::Preview));
        assert_eq!(Runtime::parse("build"), Some(Runtime::Preview));
        assert_eq!(Runtime::parse(" live "), Some(Runtime::Live));
        assert_eq!(Runtime::parse("staging"), None);
    }
}
