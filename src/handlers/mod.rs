pub mod cookie_storage;
pub mod helpers;
pub mod location;
pub mod middleware;
pub mod pages;
pub mod system;

pub use cookie_storage::CookieStorage;
pub use middleware::{location_middleware, VisitorLocation};
