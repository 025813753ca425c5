/// Fields every page shares through `base.html`.
pub trait BaseTemplate {
    fn site_name(&self) -> &str;
    fn base_url(&self) -> &str;
    fn theme(&self) -> &str;
    fn location_label(&self) -> &str;
    fn has_override(&self) -> bool;
    /// Current location as JSON, exposed to page scripts.
    fn location_json(&self) -> &str;
}

/// Implement BaseTemplate for a page struct carrying the standard fields.
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn site_name(&self) -> &str {
                &self.site_name
            }
            fn base_url(&self) -> &str {
                &self.base_url
            }
            fn theme(&self) -> &str {
                &self.theme
            }
            fn location_label(&self) -> &str {
                &self.location_label
            }
            fn has_override(&self) -> bool {
                self.has_override
            }
            fn location_json(&self) -> &str {
                &self.location_json
            }
        }
    };
}
