use askama::Template;

use crate::models::ServiceDescriptor;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
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
    pub featured: &'a ServiceDescriptor,
    pub display_location: String,
    pub cta_href: String,
    pub learn_more: String,
    pub services_label: String,
}

crate::impl_base_template!(HomeTemplate<'_>);
