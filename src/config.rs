use std::env;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::location::slug::hyphenate;
use crate::location::Runtime;
use crate::models::{ServiceArea, ServiceDescriptor, SiteCopy};
use crate::utils::parse_flag;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";

pub const SITE_FILE: &str = "site.json";
pub const SERVICES_FILE: &str = "services.json";
pub const SERVICE_AREAS_FILE: &str = "service_areas.json";

// Defaults shipped with the binary, used for any file missing from the
// configuration directory.
const DEFAULT_SITE_JSON: &str = include_str!("../config/site.json");
const DEFAULT_SERVICES_JSON: &str = include_str!("../config/services.json");
const DEFAULT_SERVICE_AREAS_JSON: &str = include_str!("../config/service_areas.json");

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_public_base_url() -> String {
    sanitize_base_url(&env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()))
}

/// `APP_RUNTIME=preview` serves the mock location to everyone. Unknown
/// values fall back to live.
pub fn get_runtime() -> Runtime {
    match env::var("APP_RUNTIME") {
        Ok(raw) => Runtime::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "unknown APP_RUNTIME, using live");
            Runtime::Live
        }),
        Err(_) => Runtime::Live,
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    env::var("SITE_CONFIG_DIR")
        .ok()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
}

pub fn geo_debug_enabled() -> bool {
    parse_flag(env::var("GEO_DEBUG").ok().as_deref(), false)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        format!("http://localhost:{}", DEFAULT_PORT)
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServicesFile {
    service_types: Vec<ServiceDescriptor>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceAreasFile {
    service_areas: Vec<ServiceArea>,
}

/// Static site configuration, loaded once at start-up and never mutated.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site: SiteCopy,
    pub services: Vec<ServiceDescriptor>,
    pub service_areas: Vec<ServiceArea>,
}

impl SiteConfig {
    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_sources(
            (SITE_FILE, DEFAULT_SITE_JSON),
            (SERVICES_FILE, DEFAULT_SERVICES_JSON),
            (SERVICE_AREAS_FILE, DEFAULT_SERVICE_AREAS_JSON),
        )
    }

    /// Load from `dir`, using the embedded default for each file that does
    /// not exist there. A file that exists but cannot be read or parsed is
    /// an error.
    pub fn load(dir: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(dir) = dir else {
            return Self::embedded();
        };
        let site = read_or_default(dir, SITE_FILE, DEFAULT_SITE_JSON)?;
        let services = read_or_default(dir, SERVICES_FILE, DEFAULT_SERVICES_JSON)?;
        let areas = read_or_default(dir, SERVICE_AREAS_FILE, DEFAULT_SERVICE_AREAS_JSON)?;
        Self::from_sources(
            (SITE_FILE, site.as_str()),
            (SERVICES_FILE, services.as_str()),
            (SERVICE_AREAS_FILE, areas.as_str()),
        )
    }

    fn from_sources(site: (&str, &str), services: (&str, &str), areas: (&str, &str)) -> Result<Self, ConfigError> {
        let copy: SiteCopy = parse_json(site.0, site.1)?;
        let services: ServicesFile = parse_json(services.0, services.1)?;
        let areas: ServiceAreasFile = parse_json(areas.0, areas.1)?;
        let config = Self {
            site: copy,
            services: services.service_types,
            service_areas: areas.service_areas,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.services.is_empty() {
            return Err(ConfigError::Invalid("no services configured".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for service in &self.services {
            if hyphenate(&service.slug) != service.slug {
                return Err(ConfigError::Invalid(format!(
                    "service slug '{}' is not canonical (expected '{}')",
                    service.slug,
                    hyphenate(&service.slug)
                )));
            }
            if !seen.insert(service.slug.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate service slug '{}'", service.slug)));
            }
        }
        if !seen.contains(self.site.featured_service.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "featured service '{}' is not in the catalog",
                self.site.featured_service
            )));
        }
        for area in &self.service_areas {
            if area.name.trim().is_empty() || area.county.trim().is_empty() {
                return Err(ConfigError::Invalid("service area needs a name and a county".into()));
            }
        }
        Ok(())
    }
}

fn parse_json<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
        name: name.to_string(),
        source,
    })
}

fn read_or_default(dir: &Path, name: &str, default: &str) -> Result<String, ConfigError> {
    let path = dir.join(name);
    if !path.exists() {
        tracing::debug!(file = %path.display(), "not found, using embedded default");
        return Ok(default.to_string());
    }
    std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
}
