use protech::config::SiteConfig;
use protech::services::{service_metadata, ServiceCatalog};

fn catalog() -> ServiceCatalog {
    ServiceCatalog::new(SiteConfig::embedded().unwrap().services)
}

#[test]
fn test_is_valid_agrees_with_lookup() {
    let catalog = catalog();
    let mut candidates: Vec<String> = catalog.slugs().iter().map(|s| s.to_string()).collect();
    candidates.extend(["chimney-sweep", "", "AC-INSTALL", "ac-install/"].map(String::from));
    for slug in &candidates {
        assert_eq!(catalog.is_valid(slug), catalog.get_by_slug(slug).is_some(), "{slug}");
    }
    assert!(!catalog.is_valid("chimney-sweep"));
}

#[test]
fn test_catalog_keeps_configuration_order() {
    let catalog = catalog();
    assert_eq!(
        catalog.slugs(),
        vec!["ac-install", "furnace-repair", "hvac-maintenance", "template-service"]
    );
    assert_eq!(
        catalog.get_by_slug("furnace-repair").map(|s| s.name.as_str()),
        Some("Furnace Repair")
    );
}

#[test]
fn test_metadata_uses_configured_templates() {
    let catalog = catalog();
    let service = catalog.get_by_slug("ac-install").unwrap();
    let meta = service_metadata(service, "Lewis Center, OH");
    assert_eq!(meta.title, "AC Installation in Lewis Center, OH");
    assert!(meta.description.contains("Lewis Center, OH"));
}

#[test]
fn test_metadata_defaults_without_templates() {
    let catalog = catalog();
    let service = catalog.get_by_slug("furnace-repair").unwrap();
    let meta = service_metadata(service, "Orrville, OH");
    assert_eq!(meta.title, "Furnace Repair in Orrville, OH");
    assert_eq!(
        meta.description,
        "Professional furnace repair services in Orrville, OH. Contact us for all your needs."
    );
}
