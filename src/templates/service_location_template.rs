use askama::Template;

#[derive(Template)]
#[template(path = "service_location.html")]
pub struct ServiceLocationTemplate {
    pub site_name: String,
    pub base_url: String,
    pub theme: String,
    pub next_theme: String,
    pub location_label: String,
    pub location_city: String,
    pub location_region: String,
    pub has_override: bool,
    pub is_detected: bool,
    pub current_path: String,
    pub location_json: String,
    pub page_title: String,
    pub description: String,
    pub canonical_url: String,
    pub service_name: String,
    pub service_description: String,
    pub location_display: String,
    pub county: Option<String>,
    pub nearby_heading: String,
    pub nearby: Vec<NearbyLink>,
    pub phone: Option<String>,
    pub service_href: String,
    pub services_href: String,
    pub back_to_home: String,
    pub back_to_service: String,
    pub back_to_services: String,
}

/// Another city in the same service area, linked to its own page.
pub struct NearbyLink {
    pub name: String,
    pub href: String,
}

crate::impl_base_template!(ServiceLocationTemplate);
