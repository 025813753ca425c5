use askama::Template;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
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
    pub requested: String,
    /// Display name of an unknown service the visitor asked for.
    pub missing_service: Option<String>,
}

crate::impl_base_template!(NotFoundTemplate);
