use askama::Template;

use crate::models::ServiceDescriptor;

#[derive(Template)]
#[template(path = "service_detail.html")]
pub struct ServiceDetailTemplate<'a> {
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
    pub service: &'a ServiceDescriptor,
    pub display_location: String,
    pub area_heading: String,
    pub local_href: String,
    pub back_to_services: String,
    pub back_to_home: String,
}

crate::impl_base_template!(ServiceDetailTemplate<'_>);
