//! Static export: every page rendered for the preview location and
//! written out as plain files.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::handlers::helpers::{build_page_globals, render_html};
use crate::handlers::pages::{home_page, not_found_page, service_detail_page, service_location_page, services_page};
use crate::handlers::VisitorLocation;
use crate::location::{location_slug, resolve, LocationSignal, Runtime};
use crate::models::{AppState, Theme};
use crate::routes::DEFAULT_STYLESHEET;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {page}: {source}")]
    Render {
        page: String,
        #[source]
        source: askama::Error,
    },

    #[error("featured service '{0}' is not in the catalog")]
    MissingFeatured(String),
}

/// Render the whole site into `out`, returning the files written.
///
/// Pages are rendered as a preview visitor sees them, so every
/// location-specific link points at the mock location.
pub async fn export_site(state: &AppState, out: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let detected = resolve(&LocationSignal::default(), &state.service_areas, Runtime::Preview);
    let visitor = VisitorLocation {
        current: detected.clone(),
        detected,
        has_override: false,
    };
    let globals = |path: &str| build_page_globals(state, &visitor, Theme::default(), path);
    let mut pages: Vec<(String, String)> = Vec::new();

    let render = |page: &str, result: askama::Result<String>| {
        result.map_err(|source| ExportError::Render {
            page: page.to_string(),
            source,
        })
    };

    let home = home_page(state, &visitor, globals("/"))
        .ok_or_else(|| ExportError::MissingFeatured(state.site.featured_service.clone()))?;
    pages.push(("index.html".into(), render("/", render_html(&home))?));
    pages.push((
        "services/index.html".into(),
        render("/services", render_html(&services_page(state, &visitor, globals("/services"))))?,
    ));

    let local = location_slug(&visitor.current);
    for service in state.catalog.get_all() {
        let path = format!("/services/{}", service.slug);
        let html = render_html(&service_detail_page(state, &visitor, service, "/services", globals(&path)));
        pages.push((format!("services/{}/index.html", service.slug), render(&path, html)?));

        let path = format!("/services/{}/{}", service.slug, local);
        let html = render_html(&service_location_page(state, service, &local, "/services", globals(&path)));
        pages.push((format!("services/{}/{}/index.html", service.slug, local), render(&path, html)?));
    }

    pages.push((
        "404.html".into(),
        render("/404", render_html(&not_found_page(state, "/404", None, globals("/404"))))?,
    ));

    let stylesheet = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    pages.push(("static/styles.css".into(), stylesheet));

    let mut written = Vec::with_capacity(pages.len());
    for (relative, contents) in pages {
        let path = out.join(&relative);
        write_file(&path, &contents).await?;
        tracing::debug!(file = %path.display(), "exported");
        written.push(path);
    }
    tracing::info!(count = written.len(), out = %out.display(), "static export complete");
    Ok(written)
}

async fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    tokio::fs::write(path, contents).await.map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
