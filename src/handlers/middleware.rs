use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::location::{resolve, Fallback, LocationOverrideStore, LocationSignal, Outcome, ResolvedLocation};
use crate::models::AppState;

use super::cookie_storage::CookieStorage;

/// The visitor's location for this request, as seen by handlers.
#[derive(Clone, Debug)]
pub struct VisitorLocation {
    pub current: ResolvedLocation,
    pub detected: ResolvedLocation,
    pub has_override: bool,
}

impl VisitorLocation {
    pub fn from_store<S: crate::location::OverrideStorage>(store: &LocationOverrideStore<S>) -> Self {
        Self {
            current: store.current().clone(),
            detected: store.detected().clone(),
            has_override: store.has_override(),
        }
    }
}

/// Resolve the edge headers and open the visitor's override cookie.
pub fn open_location_store(
    state: &AppState,
    headers: &HeaderMap,
    jar: CookieJar,
) -> Outcome<LocationOverrideStore<CookieStorage>> {
    let signal = LocationSignal::from_headers(headers);
    let detected = resolve(&signal, &state.service_areas, state.runtime);
    LocationOverrideStore::open(detected, CookieStorage::new(jar))
}

pub async fn location_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let opened = open_location_store(&state, request.headers(), jar);
    let corrupt = matches!(opened.fallback, Some(Fallback::CorruptOverride { .. }));
    let mut store = opened.into_value();
    request.extensions_mut().insert(VisitorLocation::from_store(&store));

    let response = next.run(request).await;
    if corrupt {
        // Drop the unreadable cookie so the next request starts clean.
        if let Some(fallback) = store.reset().fallback {
            tracing::warn!(%fallback, "could not clear unreadable location override");
        }
        return (store.into_storage().into_jar(), response).into_response();
    }
    response
}
