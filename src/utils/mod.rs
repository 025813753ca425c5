// URL handling utilities
pub mod url_builder;

// Parsing utilities
pub mod parse_flag;

pub use parse_flag::parse_flag;
pub use url_builder::absolute_url;
