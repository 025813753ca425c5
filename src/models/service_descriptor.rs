use serde::{Deserialize, Serialize};

/// One offered service, as configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub short_description: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Title template; `%location%` is replaced with the location label.
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}
