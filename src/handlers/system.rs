use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Map, Value};

use crate::location::{resolve, LocationSignal};
use crate::models::{AppState, THEME_COOKIE};

use super::helpers::{safe_redirect_target, theme_from_jar};
use super::location::NextForm;

pub async fn theme_toggle_post(jar: CookieJar, Form(form): Form<NextForm>) -> impl IntoResponse {
    let next_theme = theme_from_jar(&jar).toggled();
    let mut cookie = Cookie::new(THEME_COOKIE, next_theme.as_str());
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::days(365));
    (
        jar.add(cookie),
        Redirect::to(&safe_redirect_target(form.next.as_deref())),
    )
}

/// Raw edge headers next to what the resolver made of them. Disabled
/// unless `GEO_DEBUG` is set.
pub async fn geo_debug_get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.geo_debug {
        return StatusCode::NOT_FOUND.into_response();
    }

    let raw: Map<String, Value> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-vercel-"))
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    let signal = LocationSignal::from_headers(&headers);
    let resolved = resolve(&signal, &state.service_areas, state.runtime);

    Json(json!({
        "headers": raw,
        "signal": signal,
        "resolved": resolved,
        "runtime": state.runtime.as_str(),
    }))
    .into_response()
}
