use crate::models::site_copy::format_with_location;
use crate::models::ServiceDescriptor;

/// Read-only list of offered services, in configuration order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceDescriptor>,
}

/// Title and description for a service page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub title: String,
    pub description: String,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    pub fn get_all(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// Routing guard: an invalid slug is a not-found page, never a default
    /// service.
    pub fn is_valid(&self, slug: &str) -> bool {
        self.get_by_slug(slug).is_some()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Page metadata for `service` shown for `location`.
pub fn service_metadata(service: &ServiceDescriptor, location: &str) -> ServiceMetadata {
    let title = match &service.meta_title {
        Some(t) => format_with_location(t, location),
        None => format!("{} in {}", service.name, location),
    };
    let description = match &service.meta_description {
        Some(d) => format_with_location(d, location),
        None => format!(
            "Professional {} services in {}. Contact us for all your needs.",
            service.name.to_lowercase(),
            location
        ),
    };
    ServiceMetadata { title, description }
}
