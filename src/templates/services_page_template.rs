use askama::Template;

use crate::models::ServiceDescriptor;

#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesPageTemplate<'a> {
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
    pub heading: String,
    pub description: String,
    pub services: &'a [ServiceDescriptor],
    pub display_location: String,
    pub location_slug: String,
    pub local_label: String,
    pub view_service: String,
}

crate::impl_base_template!(ServicesPageTemplate<'_>);
