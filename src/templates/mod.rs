// Base template trait shared by every page
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod home_template;
pub mod not_found_template;
pub mod service_detail_template;
pub mod service_location_template;
pub mod services_page_template;

pub use home_template::HomeTemplate;
pub use not_found_template::NotFoundTemplate;
pub use service_detail_template::ServiceDetailTemplate;
pub use service_location_template::{NearbyLink, ServiceLocationTemplate};
pub use services_page_template::ServicesPageTemplate;
