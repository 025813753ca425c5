use protech::config::SiteConfig;
use protech::location::{resolve, LocationSignal, Runtime, UNKNOWN_LOCATION};
use protech::models::ServiceArea;

fn areas() -> Vec<ServiceArea> {
    SiteConfig::embedded().unwrap().service_areas
}

fn signal(city: Option<&str>, region: Option<&str>, zip: Option<&str>) -> LocationSignal {
    LocationSignal {
        country: Some("US".to_string()),
        city: city.map(str::to_string),
        region: region.map(str::to_string),
        zip: zip.map(str::to_string),
        ..LocationSignal::default()
    }
}

#[test]
fn test_member_city_resolves_to_area_identity() {
    let resolved = resolve(&signal(Some("Dalton"), Some("OH"), None), &areas(), Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some("Orrville"));
    assert_eq!(resolved.county.as_deref(), Some("Wayne County"));
    assert_eq!(resolved.matched_service_area.as_deref(), Some("Wayne County"));
    assert_eq!(resolved.region.as_deref(), Some("OH"));
    assert!(resolved.is_detected);
}

#[test]
fn test_city_match_ignores_case_and_region() {
    for (city, region) in [("dalton", Some("OH")), ("DALTON", None), ("Dalton", Some("PA"))] {
        let resolved = resolve(&signal(Some(city), region, None), &areas(), Runtime::Live);
        assert_eq!(resolved.county.as_deref(), Some("Wayne County"), "{city}");
        assert_eq!(resolved.region.as_deref(), region);
    }
}

#[test]
fn test_zip_matches_when_city_does_not() {
    let resolved = resolve(&signal(Some("Somewhere"), Some("OH"), Some("43065-1234")), &areas(), Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some("Lewis Center"));
    assert_eq!(resolved.county.as_deref(), Some("Delaware County"));
}

#[test]
fn test_unmatched_city_is_kept_as_detected() {
    let resolved = resolve(&signal(Some("Akron"), Some("OH"), Some("44308")), &areas(), Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some("Akron"));
    assert_eq!(resolved.county, None);
    assert_eq!(resolved.matched_service_area, None);
    assert!(resolved.is_detected);
}

#[test]
fn test_no_signal_gives_placeholder() {
    let resolved = resolve(&LocationSignal::default(), &areas(), Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some(UNKNOWN_LOCATION));
    assert!(!resolved.is_detected);
    assert_eq!(resolved.country, None);
    assert_eq!(resolved.region, None);
    assert_eq!(resolved.county, None);
}

#[test]
fn test_zip_only_signal_is_anonymous() {
    let zip_only = LocationSignal {
        zip: Some("44667".to_string()),
        ..LocationSignal::default()
    };
    let resolved = resolve(&zip_only, &areas(), Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some(UNKNOWN_LOCATION));
    assert!(!resolved.is_detected);
}

#[test]
fn test_region_only_signal_is_not_detected() {
    let region_only = LocationSignal {
        region: Some("OH".to_string()),
        ..LocationSignal::default()
    };
    let resolved = resolve(&region_only, &areas(), Runtime::Live);
    assert_eq!(resolved.region.as_deref(), Some("OH"));
    assert!(!resolved.is_detected);
}

#[test]
fn test_region_with_zip_does_not_match_an_area() {
    let region_and_zip = LocationSignal {
        region: Some("OH".to_string()),
        zip: Some("44667".to_string()),
        timezone: Some("America/New_York".to_string()),
        latitude: Some(40.84),
        ..LocationSignal::default()
    };
    let resolved = resolve(&region_and_zip, &areas(), Runtime::Live);
    assert!(!resolved.is_detected);
    assert_eq!(resolved.city.as_deref(), Some(UNKNOWN_LOCATION));
    assert_eq!(resolved.region.as_deref(), Some("OH"));
    assert_eq!(resolved.county, None);
    assert_eq!(resolved.matched_service_area, None);
    assert_eq!(resolved.country, None);
    assert_eq!(resolved.timezone, None);
    assert_eq!(resolved.latitude, None);
    assert_eq!(resolved.display_location(), "OH");
}

#[test]
fn test_country_with_zip_matches_area() {
    let country_and_zip = LocationSignal {
        country: Some("US".to_string()),
        zip: Some("44667".to_string()),
        ..LocationSignal::default()
    };
    let resolved = resolve(&country_and_zip, &areas(), Runtime::Live);
    assert!(resolved.is_detected);
    assert_eq!(resolved.city.as_deref(), Some("Orrville"));
    assert_eq!(resolved.county.as_deref(), Some("Wayne County"));
}

#[test]
fn test_preview_runtime_uses_mock_location() {
    let resolved = resolve(&signal(Some("Akron"), Some("OH"), None), &areas(), Runtime::Preview);
    assert_eq!(resolved.city.as_deref(), Some("Orrville"));
    assert_eq!(resolved.region.as_deref(), Some("OH"));
    assert_eq!(resolved.country.as_deref(), Some("US"));
    assert_eq!(resolved.county.as_deref(), Some("Wayne County"));
    assert!(resolved.is_detected);
}

#[test]
fn test_first_matching_area_wins() {
    let areas = vec![
        ServiceArea {
            name: "First".to_string(),
            county: "One County".to_string(),
            cities: vec!["Shared".to_string()],
            zips: vec![],
        },
        ServiceArea {
            name: "Second".to_string(),
            county: "Two County".to_string(),
            cities: vec!["Shared".to_string()],
            zips: vec![],
        },
    ];
    let resolved = resolve(&signal(Some("Shared"), None, None), &areas, Runtime::Live);
    assert_eq!(resolved.city.as_deref(), Some("First"));
}
