use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub const HEADER_COUNTRY: &str = "x-vercel-ip-country";
pub const HEADER_CITY: &str = "x-vercel-ip-city";
pub const HEADER_REGION: &str = "x-vercel-ip-country-region";
pub const HEADER_TIMEZONE: &str = "x-vercel-ip-timezone";
pub const HEADER_CONTINENT: &str = "x-vercel-ip-continent";
pub const HEADER_LATITUDE: &str = "x-vercel-ip-latitude";
pub const HEADER_LONGITUDE: &str = "x-vercel-ip-longitude";
pub const HEADER_POSTAL_CODE: &str = "x-vercel-ip-postal-code";

/// Raw geolocation data attached to a request by the edge network.
/// Every field may be missing independently of the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSignal {
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip: Option<String>,
}

impl LocationSignal {
    /// Read the edge geolocation headers. Empty values and unparsable
    /// coordinates are treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            country: header_text(headers, HEADER_COUNTRY),
            // The edge network percent-encodes city names ("Lewis%20Center").
            city: header_text(headers, HEADER_CITY).map(|c| {
                urlencoding::decode(&c)
                    .map(|d| d.into_owned())
                    .unwrap_or(c)
            }),
            region: header_text(headers, HEADER_REGION),
            timezone: header_text(headers, HEADER_TIMEZONE),
            continent: header_text(headers, HEADER_CONTINENT),
            latitude: header_coordinate(headers, HEADER_LATITUDE),
            longitude: header_coordinate(headers, HEADER_LONGITUDE),
            zip: header_text(headers, HEADER_POSTAL_CODE),
        }
    }

    /// True when none of the identifying fields (country, city, region)
    /// is present.
    pub fn is_anonymous(&self) -> bool {
        self.country.is_none() && self.city.is_none() && self.region.is_none()
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn header_coordinate(headers: &HeaderMap, name: &str) -> Option<f64> {
    header_text(headers, name)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_present_headers_and_skips_blank_ones() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_COUNTRY, HeaderValue::from_static("US"));
        headers.insert(HEADER_CITY, HeaderValue::from_static("Lewis%20Center"));
        headers.insert(HEADER_REGION, HeaderValue::from_static("  "));
        headers.insert(HEADER_LATITUDE, HeaderValue::from_static("40.1984"));
        headers.insert(HEADER_LONGITUDE, HeaderValue::from_static("not-a-number"));

        let signal = LocationSignal::from_headers(&headers);
        assert_eq!(signal.country.as_deref(), Some("US"));
        assert_eq!(signal.city.as_deref(), Some("Lewis Center"));
        assert_eq!(signal.region, None);
        assert_eq!(signal.latitude, Some(40.1984));
        assert_eq!(signal.longitude, None);
        assert!(!signal.is_anonymous());
    }

    #[test]
    fn no_headers_is_anonymous() {
        assert!(LocationSignal::from_headers(&HeaderMap::new()).is_anonymous());
    }
}
