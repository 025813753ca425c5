pub mod catalog;

pub use catalog::{service_metadata, ServiceCatalog, ServiceMetadata};
