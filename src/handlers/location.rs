use axum::{
    extract::{Extension, Form, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::location::{location_slug, LocationPatch};
use crate::models::AppState;

use super::helpers::safe_redirect_target;
use super::middleware::{open_location_store, VisitorLocation};

#[derive(Deserialize)]
pub struct OverrideForm {
    pub next: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl OverrideForm {
    fn patch(&self) -> LocationPatch {
        LocationPatch {
            city: self.city.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
            ..LocationPatch::default()
        }
        .trimmed()
    }
}

#[derive(Deserialize)]
pub struct NextForm {
    pub next: Option<String>,
}

pub async fn override_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<OverrideForm>,
) -> impl IntoResponse {
    let target = safe_redirect_target(form.next.as_deref());
    let patch = form.patch();
    if patch.is_empty() {
        return (jar, Redirect::to(&target));
    }

    let mut store = open_location_store(&state, &headers, jar).into_value();
    let outcome = store.override_location(patch);
    tracing::info!(
        location = %outcome.value.display_location(),
        persisted = !outcome.is_degraded(),
        "location override set"
    );
    (store.into_storage().into_jar(), Redirect::to(&target))
}

pub async fn reset_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<NextForm>,
) -> impl IntoResponse {
    let target = safe_redirect_target(form.next.as_deref());
    let mut store = open_location_store(&state, &headers, jar).into_value();
    let outcome = store.reset();
    tracing::info!(location = %outcome.value.display_location(), "location override cleared");
    (store.into_storage().into_jar(), Redirect::to(&target))
}

/// Current location for client scripts.
pub async fn location_api_get(Extension(visitor): Extension<VisitorLocation>) -> impl IntoResponse {
    Json(json!({
        "location": visitor.current,
        "detected": visitor.detected,
        "hasOverride": visitor.has_override,
        "displayLocation": visitor.current.display_location(),
        "formattedLocation": visitor.current.formatted_location(),
        "slug": location_slug(&visitor.current),
    }))
}
