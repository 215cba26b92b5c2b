//! Shared types passed between the collector, the expanders and the report.
//!
//! All of them serialize to JSON for `seo-inventory routes`.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Which content provider produced a dynamic route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Blog,
    Library,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Blog => write!(f, "blog"),
            ContentSource::Library => write!(f, "library"),
        }
    }
}

/// One content item standing in for a dynamic route.
///
/// Every field is already derived: titles normalized, canonical URLs
/// pointed at the production host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub canonical: String,
    pub h1: String,
}

/// How a route's row is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouteKind {
    /// A page file analysed statically.
    Static,
    /// A concrete instance of a dynamic route, backed by a content item.
    Content {
        source: ContentSource,
        item: ContentItem,
    },
}

/// One discoverable page route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// URL path, groups and slots elided.
    pub route: String,
    /// Page source file. For content routes, the dynamic route's page.
    pub file_path: PathBuf,
    #[serde(flatten)]
    pub kind: RouteKind,
}

impl RouteEntry {
    pub fn slug(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::Static => None,
            RouteKind::Content { item, .. } => Some(&item.slug),
        }
    }
}

/// One row of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub route: String,
    pub title: String,
    pub meta_description: String,
    pub canonical: String,
    pub h1: String,
    pub robots: String,
    pub structured_data: bool,
}
