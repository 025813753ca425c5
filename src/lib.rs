pub mod config;
pub mod export;
pub mod handlers;
pub mod location;
pub mod models;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;
