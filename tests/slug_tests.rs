use protech::location::slug::{
    format_service_name, is_plausible_slug, normalize_slug, parse_slug, to_display_name, to_slug,
};
use protech::location::{Fallback, DEFAULT_FALLBACK_SLUG};

#[test]
fn test_to_slug_joins_city_and_region() {
    assert_eq!(to_slug(Some("Lewis Center"), Some("OH"), DEFAULT_FALLBACK_SLUG), "lewis-center-oh");
    assert_eq!(to_slug(Some("  San   Francisco "), Some("ca"), DEFAULT_FALLBACK_SLUG), "san-francisco-ca");
}

#[test]
fn test_to_slug_single_part_and_fallback() {
    assert_eq!(to_slug(Some("Chicago"), None, DEFAULT_FALLBACK_SLUG), "chicago");
    assert_eq!(to_slug(None, Some("OH"), DEFAULT_FALLBACK_SLUG), "oh");
    assert_eq!(to_slug(None, None, "near-you"), "near-you");
    assert_eq!(to_slug(Some("   "), Some(""), DEFAULT_FALLBACK_SLUG), DEFAULT_FALLBACK_SLUG);
}

#[test]
fn test_to_slug_never_contains_whitespace_or_double_hyphen() {
    let inputs = [
        (Some("St. Louis"), Some("MO")),
        (Some("Winston - Salem"), Some("NC")),
        (Some("O'Fallon"), None),
        (Some("\tNew\nYork "), Some(" NY ")),
    ];
    for (city, region) in inputs {
        let slug = to_slug(city, region, DEFAULT_FALLBACK_SLUG);
        assert!(!slug.chars().any(char::is_whitespace), "{slug}");
        assert!(!slug.contains("--"), "{slug}");
        assert_eq!(slug, slug.to_lowercase());
    }
    // A sloppy fallback is cleaned up as well.
    assert_eq!(to_slug(None, None, "your  area"), "your-area");
}

#[test]
fn test_display_name_reads_trailing_region() {
    assert_eq!(to_display_name("lewis-center-oh").value, "Lewis Center, OH");
    assert_eq!(to_display_name("chicago").value, "Chicago");
    assert_eq!(to_display_name("new-york").value, "New York");
}

#[test]
fn test_two_letter_city_word_is_read_as_region() {
    // Known false positive of the trailing-code rule.
    assert_eq!(to_display_name("grand-du").value, "Grand, DU");
}

#[test]
fn test_display_name_handles_encoded_spaces() {
    assert_eq!(to_display_name("lewis%20center-oh").value, "Lewis Center, OH");
}

#[test]
fn test_malformed_encoding_falls_back_to_raw() {
    let outcome = to_display_name("caf%ff-oh");
    assert!(matches!(outcome.fallback, Some(Fallback::MalformedEncoding { .. })));
    assert_eq!(outcome.value, "Caf%ff, OH");
}

#[test]
fn test_slug_round_trip_through_display() {
    let slug = to_slug(Some("Lewis Center"), Some("OH"), DEFAULT_FALLBACK_SLUG);
    assert_eq!(parse_slug(&slug).value.to_slug(), slug);
}

#[test]
fn test_to_slug_is_idempotent_on_canonical_slugs() {
    let canonical = ["chicago", "lewis-center-oh", "a-b-c-d", "route-66", "x1-y2", "3rd-street"];
    for slug in canonical {
        assert_eq!(to_slug(Some(slug), None, DEFAULT_FALLBACK_SLUG), slug, "to_slug({slug})");
        assert_eq!(parse_slug(slug).value.to_slug(), slug, "parse_slug({slug})");
    }
}

#[test]
fn test_normalize_and_plausibility() {
    assert_eq!(normalize_slug("Lewis%20Center-OH"), "lewis-center-oh");
    assert!(is_plausible_slug("lewis-center-oh"));
    assert!(!is_plausible_slug("-oh"));
    assert!(!is_plausible_slug("a--b"));
    assert!(!is_plausible_slug("ab"));
    assert!(!is_plausible_slug("Lewis-Center"));
}

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("hvac-maintenance"), "Hvac Maintenance");
    assert_eq!(format_service_name("ac--install"), "Ac Install");
}
