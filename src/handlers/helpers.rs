use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::models::{AppState, Theme, THEME_COOKIE};
use crate::templates::BaseTemplate;

use super::middleware::VisitorLocation;

pub fn theme_from_jar(jar: &CookieJar) -> Theme {
    Theme::from_cookie(jar.get(THEME_COOKIE).map(|c| c.value()))
}

#[derive(Default)]
pub struct PageGlobals {
    pub site_name: String,
    pub base_url: String,
    pub theme: String,
    pub next_theme: String,
    pub location_label: String,
    pub location_city: String,
    pub location_region: String,
    pub has_override: bool,
    pub is_detected: bool,
    pub current_path: String,
    pub location_json: String,
}

pub fn build_page_globals(state: &AppState, visitor: &VisitorLocation, theme: Theme, path: &str) -> PageGlobals {
    let current = &visitor.current;
    PageGlobals {
        site_name: state.site.company_name.clone(),
        base_url: state.public_base_url.clone(),
        theme: theme.as_str().to_string(),
        next_theme: theme.toggled().as_str().to_string(),
        location_label: current.display_location(),
        location_city: current.known_city().unwrap_or_default().to_string(),
        location_region: current.region.clone().unwrap_or_default(),
        has_override: visitor.has_override,
        is_detected: current.is_detected,
        current_path: path.to_string(),
        location_json: serde_json::to_string(current).unwrap_or_else(|_| "null".to_string()),
    }
}

/// Expose the visitor's location to page scripts as `window.__LOCATION__`.
pub fn inject_context(html: &str, location_json: &str) -> String {
    // `<` would let a user-supplied city close the script element.
    let safe = location_json.replace('<', "\\u003c");
    let script = format!("<script>window.__LOCATION__ = {};</script>", safe);
    match html.rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..idx]);
            out.push_str(&script);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{}{}", html, script),
    }
}

/// Render a page template into its final HTML, context script included.
pub fn render_html<T: askama::Template + BaseTemplate>(t: &T) -> askama::Result<String> {
    let body = t.render()?;
    Ok(inject_context(&body, t.location_json()))
}

pub fn render_template<T: askama::Template + BaseTemplate>(t: T) -> Response {
    render_with_status(StatusCode::OK, t)
}

pub fn render_with_status<T: askama::Template + BaseTemplate>(status: StatusCode, t: T) -> Response {
    match render_html(&t) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Only same-site absolute paths are followed after a form post.
pub fn safe_redirect_target(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_string(),
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_context_escapes_script_breakout() {
        let html = "<html><body><p>hi</p></body></html>";
        let out = inject_context(html, r#"{"city":"</script><script>alert(1)"}"#);
        assert!(!out.contains("</script><script>alert(1)"));
        assert!(out.ends_with("</script></body></html>"));
        assert!(out.contains("window.__LOCATION__"));
    }

    #[test]
    fn redirect_target_rejects_other_hosts() {
        assert_eq!(safe_redirect_target(Some("/services/ac-install")), "/services/ac-install");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect_target(None), "/");
    }
}
