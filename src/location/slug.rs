//! Location slugs: the URL-path form of a location and its display form.
//!
//! `to_slug` builds `lewis-center-oh` from `("Lewis Center", "OH")` and
//! `to_display_name` turns it back into `Lewis Center, OH`.

use super::outcome::{Fallback, Outcome};

/// Slug used in links when nothing about the visitor's location is known.
pub const DEFAULT_FALLBACK_SLUG: &str = "your-area";

/// Lowercase `raw` and join its alphanumeric runs with single hyphens.
///
/// Whitespace, `-` and `_` separate words; any other punctuation is dropped
/// (`"St. Louis"` becomes `st-louis`, `"O'Fallon"` becomes `ofallon`).
/// Non-ASCII letters are dropped as well since slugs are English-only.
pub fn hyphenate(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }
    slug
}

/// Build the canonical location slug.
///
/// Both parts present gives `city-region`, a single part gives that part,
/// nothing usable gives `fallback`. Inputs that hyphenate to an empty string
/// count as absent.
pub fn to_slug(city: Option<&str>, region: Option<&str>, fallback: &str) -> String {
    let city = city.map(hyphenate).filter(|s| !s.is_empty());
    let region = region.map(hyphenate).filter(|s| !s.is_empty());
    let slug = match (city, region) {
        (Some(city), Some(region)) => format!("{}-{}", city, region),
        (Some(one), None) | (None, Some(one)) => one,
        (None, None) => fallback.to_string(),
    };
    guard_separators(slug)
}

// Last line of defence for the "no whitespace, no `--`" rule. Only a
// fallback token passed in by a caller can trip it.
fn guard_separators(slug: String) -> String {
    if !slug.chars().any(char::is_whitespace) && !slug.contains("--") {
        return slug;
    }
    tracing::warn!(%slug, "whitespace survived slug normalization, replacing");
    let mut guarded = String::with_capacity(slug.len());
    for ch in slug.trim().chars() {
        let ch = if ch.is_whitespace() { '-' } else { ch };
        if ch == '-' && (guarded.is_empty() || guarded.ends_with('-')) {
            continue;
        }
        guarded.push(ch);
    }
    guarded.trim_end_matches('-').to_string()
}

/// A location slug split into its city words and optional region code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationParts {
    pub city_words: Vec<String>,
    pub region: Option<String>,
}

impl LocationParts {
    /// `["lewis", "center"]` becomes `Lewis Center`.
    pub fn city_display(&self) -> String {
        self.city_words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn region_code(&self) -> Option<String> {
        self.region.as_ref().map(|r| r.to_uppercase())
    }

    pub fn display_name(&self) -> String {
        let city = self.city_display();
        match self.region_code() {
            Some(region) => format!("{}, {}", city, region),
            None => city,
        }
    }

    /// The canonical slug for these parts.
    pub fn to_slug(&self) -> String {
        let city = self.city_display();
        to_slug(Some(&city), self.region.as_deref(), DEFAULT_FALLBACK_SLUG)
    }
}

/// Split a slug into city words and a trailing region code.
///
/// A final segment of exactly two ASCII letters is read as a region code.
/// This also fires for city names that really end in a two-letter word
/// (`"grand-du"` would render as `Grand, DU`); links depend on the current
/// behaviour so it is kept as is.
///
/// Percent-encoded input is decoded first. If decoding fails the raw string
/// is used and the outcome records the fallback.
pub fn parse_slug(slug: &str) -> Outcome<LocationParts> {
    let decoded = decode_slug(slug);
    let mut words: Vec<String> = decoded
        .value
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    let has_region = words.len() > 1
        && words
            .last()
            .map(|w| w.len() == 2 && w.chars().all(|c| c.is_ascii_alphabetic()))
            .unwrap_or(false);
    let region = if has_region { words.pop() } else { None };

    Outcome {
        value: LocationParts {
            city_words: words,
            region,
        },
        fallback: decoded.fallback,
    }
}

/// Human-readable form of a location slug.
///
/// ```
/// use protech::location::slug::to_display_name;
///
/// assert_eq!(to_display_name("lewis-center-oh").value, "Lewis Center, OH");
/// assert_eq!(to_display_name("chicago").value, "Chicago");
/// ```
pub fn to_display_name(slug: &str) -> Outcome<String> {
    parse_slug(slug).map(|parts| parts.display_name())
}

/// Decode `%XX` sequences when present, keeping the raw input on failure.
pub fn decode_slug(slug: &str) -> Outcome<String> {
    if !slug.contains('%') {
        return Outcome::clean(slug.to_string());
    }
    match urlencoding::decode(slug) {
        Ok(decoded) => Outcome::clean(decoded.into_owned()),
        Err(e) => {
            tracing::debug!(%slug, error = %e, "location slug is not valid percent-encoding");
            Outcome::degraded(
                slug.to_string(),
                Fallback::MalformedEncoding {
                    input: slug.to_string(),
                    reason: e.to_string(),
                },
            )
        }
    }
}

/// Canonical form of an arbitrary location path segment.
pub fn normalize_slug(raw: &str) -> String {
    hyphenate(&decode_slug(raw).value)
}

/// Whether `slug` looks like a location slug at all: three or more
/// characters of `[a-z0-9-]`, alphanumeric at both ends, no `--`.
pub fn is_plausible_slug(slug: &str) -> bool {
    let bytes = slug.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() >= 3
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase() || *b == b'-')
        && !slug.contains("--")
}

/// `ac-install` becomes `Ac Install`. Used when a service has no
/// configured name.
pub fn format_service_name(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenate_collapses_separators() {
        assert_eq!(hyphenate("  Lewis   Center "), "lewis-center");
        assert_eq!(hyphenate("lewis--center"), "lewis-center");
        assert_eq!(hyphenate("St. Louis"), "st-louis");
        assert_eq!(hyphenate("O'Fallon"), "ofallon");
        assert_eq!(hyphenate("-_-"), "");
    }

    #[test]
    fn guard_replaces_whitespace_in_fallback() {
        assert_eq!(to_slug(None, None, "your area"), "your-area");
        assert_eq!(to_slug(None, None, " your  area "), "your-area");
    }

    #[test]
    fn two_letter_digits_are_not_a_region() {
        let parts = parse_slug("route-66").value;
        assert_eq!(parts.region, None);
        assert_eq!(parts.city_display(), "Route 66");
    }

    #[test]
    fn single_two_letter_segment_is_a_city() {
        assert_eq!(to_display_name("oh").value, "Oh");
    }

    #[test]
    fn capitalize_keeps_the_tail() {
        assert_eq!(capitalize("mcDonald"), "McDonald");
        assert_eq!(capitalize(""), "");
    }
}
