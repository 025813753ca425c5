use serde::{Deserialize, Serialize};

/// A named group of cities and zips served under one identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    /// Canonical city shown for every member of the area.
    pub name: String,
    pub county: String,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub zips: Vec<String>,
}

impl ServiceArea {
    /// Case-insensitive, whitespace-tolerant city membership.
    pub fn contains_city(&self, city: &str) -> bool {
        let wanted = city.trim();
        !wanted.is_empty()
            && (self.name.eq_ignore_ascii_case(wanted)
                || self.cities.iter().any(|c| c.trim().eq_ignore_ascii_case(wanted)))
    }

    pub fn contains_zip(&self, zip: &str) -> bool {
        // ZIP+4 codes match on their five-digit prefix.
        let wanted = zip.trim().split('-').next().unwrap_or("");
        !wanted.is_empty() && self.zips.iter().any(|z| z.trim() == wanted)
    }

    /// Member cities other than the canonical one, for "also serving" lists.
    pub fn neighbours(&self) -> Vec<&str> {
        self.cities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.eq_ignore_ascii_case(&self.name))
            .collect()
    }
}
