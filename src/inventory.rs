//! The inventory pipeline.
//!
//! ```text
//! app/ ──collect──▶ routes ──expand (blog, library)──▶ routes ──rows──▶ CSV
//! ```
//!
//! 1. [`scan::collect_routes`] walks the app tree.
//! 2. Each [`ContentProvider`] replaces its placeholder route with concrete
//!    routes, blog first, then library.
//! 3. Static routes get their row from the page's metadata export and the
//!    route directory's heading scan. Content routes are filled entirely
//!    from their content item.
//!
//! Everything is recomputed on each run; nothing is cached between runs.

use crate::config::InventoryConfig;
use crate::content::{self, ContentError, ContentProvider};
use crate::heading;
use crate::metadata;
use crate::report::{self, ReportError};
use crate::scan::{self, ScanError};
use crate::script::ScriptError;
use crate::types::{ContentItem, InventoryRow, RouteEntry, RouteKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Robots value for every content route.
const CONTENT_ROBOTS: &str = "index";

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Metadata error: {0}")]
    Metadata(#[from] ScriptError),
    #[error("IO error scanning {path}: {source}")]
    Heading {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Result of a full run.
#[derive(Debug)]
pub struct InventorySummary {
    pub output: PathBuf,
    pub rows: Vec<InventoryRow>,
}

/// Collect and expand all routes, sorted by route.
pub fn discover_routes(
    root: &Path,
    config: &InventoryConfig,
) -> Result<Vec<RouteEntry>, InventoryError> {
    let app_dir = config.app_dir(root);
    let mut routes = scan::collect_routes(&app_dir)?;
    debug!("collected {} page routes under {}", routes.len(), app_dir.display());

    for provider in content::providers(root, config) {
        let added = content::expand(&mut routes, provider.as_ref(), &app_dir)?;
        debug!("{} provider added {added} routes", provider.source());
    }

    routes.sort_by(|a, b| a.route.cmp(&b.route));
    Ok(routes)
}

/// Compute the report row for one route.
pub fn build_row(
    entry: &RouteEntry,
    config: &InventoryConfig,
) -> Result<InventoryRow, InventoryError> {
    match &entry.kind {
        RouteKind::Static => static_row(entry, config),
        RouteKind::Content { item, .. } => Ok(content_row(&entry.route, item)),
    }
}

fn static_row(
    entry: &RouteEntry,
    config: &InventoryConfig,
) -> Result<InventoryRow, InventoryError> {
    let meta = metadata::extract_metadata(&entry.file_path, &config.site)?;

    let dir = entry.file_path.parent().unwrap_or(&entry.file_path);
    let scan = heading::scan_route_dir(dir, &config.markers).map_err(|source| {
        InventoryError::Heading {
            path: dir.to_path_buf(),
            source,
        }
    })?;

    debug!(
        route = %entry.route,
        title = meta.title.is_some(),
        heading = scan.heading.is_some(),
        "static route"
    );

    Ok(InventoryRow {
        route: entry.route.clone(),
        title: meta.title.unwrap_or_default(),
        meta_description: meta.description.unwrap_or_default(),
        canonical: meta.canonical.unwrap_or_default(),
        h1: scan.heading.unwrap_or_default(),
        robots: meta.robots.unwrap_or_default(),
        structured_data: scan.structured_data,
    })
}

fn content_row(route: &str, item: &ContentItem) -> InventoryRow {
    InventoryRow {
        route: route.to_string(),
        title: item.title.clone(),
        meta_description: item.description.clone().unwrap_or_default(),
        canonical: item.canonical.clone(),
        h1: item.h1.clone(),
        robots: CONTENT_ROBOTS.to_string(),
        structured_data: true,
    }
}

/// Build every row, in route order.
pub fn build_inventory(
    root: &Path,
    config: &InventoryConfig,
) -> Result<Vec<InventoryRow>, InventoryError> {
    discover_routes(root, config)?
        .iter()
        .map(|entry| build_row(entry, config))
        .collect()
}

/// Build the inventory and write it to `output`, or to the configured
/// output path under `root`.
pub fn run(
    root: &Path,
    config: &InventoryConfig,
    output: Option<&Path>,
) -> Result<InventorySummary, InventoryError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_path(root));
    let rows = build_inventory(root, config)?;
    let written = report::write_csv(&output, &rows)?;
    info!("wrote {written} rows to {}", output.display());
    Ok(InventorySummary { output, rows })
}
