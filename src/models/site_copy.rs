use serde::{Deserialize, Serialize};

/// Labels for buttons and links.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToActions {
    pub view_service: String,
    pub learn_more: String,
    pub back_to_home: String,
    pub back_to_services: String,
    pub back_to_service: String,
}

impl Default for CallToActions {
    fn default() -> Self {
        Self {
            view_service: "View Service".into(),
            learn_more: "Learn More".into(),
            back_to_home: "Back to Home".into(),
            back_to_services: "All Services".into(),
            back_to_service: "Back to Service".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTitles {
    pub services: String,
    pub service_area: String,
    pub nearby: String,
}

impl Default for SectionTitles {
    fn default() -> Self {
        Self {
            services: "Our Services".into(),
            service_area: "Service Available in %location%".into(),
            nearby: "Also Serving".into(),
        }
    }
}

/// Company details and page copy from `site.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCopy {
    pub company_name: String,
    /// Page title template; `%s` is replaced with the page title.
    pub title_template: String,
    pub description: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Service promoted on the home page.
    pub featured_service: String,
    #[serde(default)]
    pub call_to_actions: CallToActions,
    #[serde(default)]
    pub section_titles: SectionTitles,
}

impl SiteCopy {
    pub fn formatted_title(&self, title: &str) -> String {
        self.title_template.replace("%s", title)
    }
}

/// Replace every `%location%` placeholder in `text`.
pub fn format_with_location(text: &str, location: &str) -> String {
    text.replace("%location%", location)
}
