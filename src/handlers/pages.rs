use axum::{
    extract::{Extension, Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::location::slug::{format_service_name, is_plausible_slug, normalize_slug, parse_slug, to_slug};
use crate::location::{location_slug, DEFAULT_FALLBACK_SLUG};
use crate::models::site_copy::format_with_location;
use crate::models::{AppState, ServiceDescriptor};
use crate::services::service_metadata;
use crate::templates::{
    HomeTemplate, NearbyLink, NotFoundTemplate, ServiceDetailTemplate, ServiceLocationTemplate,
    ServicesPageTemplate,
};
use crate::utils::absolute_url;

use super::helpers::{build_page_globals, render_template, render_with_status, theme_from_jar, PageGlobals};
use super::middleware::VisitorLocation;

/// Service pages are reachable at the root (`/:service`) and under
/// `/services`; links keep whichever prefix the visitor came in on.
fn service_base(path: &str) -> &'static str {
    if path.starts_with("/services/") {
        "/services"
    } else {
        ""
    }
}

/// `None` only if the featured service is missing from the catalog, which
/// configuration validation rules out.
pub fn home_page<'a>(
    state: &'a AppState,
    visitor: &VisitorLocation,
    globals: PageGlobals,
) -> Option<HomeTemplate<'a>> {
    let PageGlobals {
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    } = globals;

    let featured = state.catalog.get_by_slug(&state.site.featured_service)?;
    let cta_href = format!("/{}/{}", featured.slug, location_slug(&visitor.current));

    Some(HomeTemplate {
        page_title: state.site.formatted_title("Home"),
        description: state.site.description.clone(),
        display_location: visitor.current.display_location(),
        featured,
        cta_href,
        learn_more: state.site.call_to_actions.learn_more.clone(),
        services_label: state.site.section_titles.services.clone(),
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    })
}

pub fn services_page<'a>(
    state: &'a AppState,
    visitor: &VisitorLocation,
    globals: PageGlobals,
) -> ServicesPageTemplate<'a> {
    let PageGlobals {
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    } = globals;

    let local_label = visitor
        .current
        .known_city()
        .map(str::to_string)
        .unwrap_or_else(|| "Your Area".to_string());

    ServicesPageTemplate {
        page_title: state.site.formatted_title(&state.site.section_titles.services),
        heading: state.site.section_titles.services.clone(),
        description: state.site.description.clone(),
        services: state.catalog.get_all(),
        display_location: visitor.current.display_location(),
        location_slug: location_slug(&visitor.current),
        local_label,
        view_service: state.site.call_to_actions.view_service.clone(),
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    }
}

pub fn service_detail_page<'a>(
    state: &AppState,
    visitor: &VisitorLocation,
    service: &'a ServiceDescriptor,
    base: &str,
    globals: PageGlobals,
) -> ServiceDetailTemplate<'a> {
    let PageGlobals {
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    } = globals;

    let display_location = visitor.current.display_location();
    ServiceDetailTemplate {
        page_title: state.site.formatted_title(&service.name),
        area_heading: format_with_location(&state.site.section_titles.service_area, &display_location),
        local_href: format!("{}/{}/{}", base, service.slug, location_slug(&visitor.current)),
        back_to_services: state.site.call_to_actions.back_to_services.clone(),
        back_to_home: state.site.call_to_actions.back_to_home.clone(),
        display_location,
        service,
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    }
}

/// The localized landing page for `service` in the location named by
/// `location` (a slug such as `lewis-center-oh`).
pub fn service_location_page(
    state: &AppState,
    service: &ServiceDescriptor,
    location: &str,
    base: &str,
    globals: PageGlobals,
) -> ServiceLocationTemplate {
    let PageGlobals {
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    } = globals;

    let parsed = parse_slug(location);
    if let Some(fallback) = &parsed.fallback {
        tracing::debug!(%fallback, slug = %location, "rendering location slug undecoded");
    }
    let parts = parsed.into_value();
    let mut location_display = parts.display_name();
    if location_display.is_empty() {
        location_display = "Your Area".to_string();
    }

    let meta = service_metadata(service, &location_display);

    let canonical_slug = normalize_slug(location);
    let canonical_slug = if is_plausible_slug(&canonical_slug) {
        canonical_slug
    } else {
        DEFAULT_FALLBACK_SLUG.to_string()
    };
    let canonical_url = absolute_url(&base_url, &format!("/services/{}/{}", service.slug, canonical_slug));

    let city = parts.city_display();
    let region = parts.region_code();
    let area = state.area_for_city(&city);
    let county = area.map(|a| a.county.clone());
    let nearby: Vec<NearbyLink> = area
        .map(|a| {
            std::iter::once(a.name.as_str())
                .chain(a.neighbours())
                .filter(|n| !n.eq_ignore_ascii_case(&city))
                .map(|name| NearbyLink {
                    name: name.to_string(),
                    href: format!(
                        "{}/{}/{}",
                        base,
                        service.slug,
                        to_slug(Some(name), region.as_deref(), DEFAULT_FALLBACK_SLUG)
                    ),
                })
                .collect()
        })
        .unwrap_or_default();

    ServiceLocationTemplate {
        page_title: state.site.formatted_title(&meta.title),
        description: meta.description,
        canonical_url,
        service_name: service.name.clone(),
        service_description: service.description.clone(),
        location_display,
        county,
        nearby_heading: state.site.section_titles.nearby.clone(),
        nearby,
        phone: state.site.phone.clone(),
        service_href: format!("{}/{}", base, service.slug),
        services_href: "/services".to_string(),
        back_to_home: state.site.call_to_actions.back_to_home.clone(),
        back_to_service: state.site.call_to_actions.back_to_service.clone(),
        back_to_services: state.site.call_to_actions.back_to_services.clone(),
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    }
}

pub fn not_found_page(
    state: &AppState,
    requested: &str,
    missing_service: Option<&str>,
    globals: PageGlobals,
) -> NotFoundTemplate {
    let PageGlobals {
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    } = globals;

    NotFoundTemplate {
        page_title: state.site.formatted_title("Page Not Found"),
        requested: requested.to_string(),
        missing_service: missing_service.map(format_service_name),
        site_name,
        base_url,
        theme,
        next_theme,
        location_label,
        location_city,
        location_region,
        has_override,
        is_detected,
        current_path,
        location_json,
    }
}

pub async fn home_get(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorLocation>,
    jar: CookieJar,
    uri: Uri,
) -> impl IntoResponse {
    let globals = build_page_globals(&state, &visitor, theme_from_jar(&jar), uri.path());
    match home_page(&state, &visitor, globals) {
        Some(page) => render_template(page),
        None => {
            tracing::error!(featured = %state.site.featured_service, "featured service is not in the catalog");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn services_get(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorLocation>,
    jar: CookieJar,
    uri: Uri,
) -> impl IntoResponse {
    let globals = build_page_globals(&state, &visitor, theme_from_jar(&jar), uri.path());
    render_template(services_page(&state, &visitor, globals))
}

pub async fn service_get(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorLocation>,
    jar: CookieJar,
    uri: Uri,
    Path(service): Path<String>,
) -> Response {
    let globals = build_page_globals(&state, &visitor, theme_from_jar(&jar), uri.path());
    let Some(descriptor) = state.catalog.get_by_slug(&service) else {
        tracing::debug!(%service, "unknown service requested");
        let page = not_found_page(&state, uri.path(), Some(service.as_str()), globals);
        return render_with_status(StatusCode::NOT_FOUND, page);
    };
    render_template(service_detail_page(
        &state,
        &visitor,
        descriptor,
        service_base(uri.path()),
        globals,
    ))
}

pub async fn service_location_get(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorLocation>,
    jar: CookieJar,
    uri: Uri,
    Path((service, location)): Path<(String, String)>,
) -> Response {
    let globals = build_page_globals(&state, &visitor, theme_from_jar(&jar), uri.path());
    let Some(descriptor) = state.catalog.get_by_slug(&service) else {
        tracing::debug!(%service, %location, "unknown service requested");
        let page = not_found_page(&state, uri.path(), Some(service.as_str()), globals);
        return render_with_status(StatusCode::NOT_FOUND, page);
    };
    render_template(service_location_page(
        &state,
        descriptor,
        &location,
        service_base(uri.path()),
        globals,
    ))
}

pub async fn not_found(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorLocation>,
    jar: CookieJar,
    uri: Uri,
) -> Response {
    let globals = build_page_globals(&state, &visitor, theme_from_jar(&jar), uri.path());
    render_with_status(StatusCode::NOT_FOUND, not_found_page(&state, uri.path(), None, globals))
}
