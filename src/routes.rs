use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{location, location_middleware, pages, system};
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let site = Router::new()
        .route("/", get(pages::home_get))
        .route("/services", get(pages::services_get))
        .route("/services/:service", get(pages::service_get))
        .route("/services/:service/:location", get(pages::service_location_get))
        .route("/location", post(location::override_post))
        .route("/location/reset", post(location::reset_post))
        .route("/theme/toggle", post(system::theme_toggle_post))
        .route("/api/location", get(location::location_api_get))
        .route("/api/geo-debug", get(system::geo_debug_get))
        .route("/:service", get(pages::service_get))
        .route("/:service/:location", get(pages::service_location_get))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(state.clone(), location_middleware));

    site
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
