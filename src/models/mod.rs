pub mod app_state;
pub mod service_area;
pub mod service_descriptor;
pub mod site_copy;
pub mod theme;

pub use app_state::AppState;
pub use service_area::ServiceArea;
pub use service_descriptor::ServiceDescriptor;
pub use site_copy::{CallToActions, SectionTitles, SiteCopy};
pub use theme::{Theme, THEME_COOKIE};
