//! Dynamic route expansion.
//!
//! The app tree contains dynamic routes like `/blog/[slug]` whose concrete
//! pages only exist at build time. Each [`ContentProvider`] knows one content
//! source, lists its items, and names the placeholder route those items
//! replace. [`expand`] swaps the placeholder entry for one [`RouteEntry`]
//! per item.
//!
//! ## Providers
//!
//! - [`blog::BlogProvider`]: markdown posts with YAML frontmatter
//! - [`library::LibraryProvider`]: a TypeScript seed module of short-form
//!   lessons, read through [`crate::script`]

pub mod blog;
pub mod library;

use crate::config::InventoryConfig;
use crate::naming;
use crate::script::ScriptError;
use crate::types::{ContentItem, ContentSource, RouteEntry, RouteKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// A source of concrete items for one dynamic route.
pub trait ContentProvider {
    fn source(&self) -> ContentSource;

    /// The dynamic route these items replace, e.g. `/blog/[slug]`.
    fn placeholder(&self) -> &str;

    /// All items, in a stable order. A missing source yields no items.
    fn items(&self) -> Result<Vec<ContentItem>, ContentError>;

    /// Concrete route for `slug`.
    fn route_for(&self, slug: &str) -> String {
        naming::fill_dynamic_segment(self.placeholder(), slug)
    }
}

/// The configured providers, in expansion order.
pub fn providers(root: &Path, config: &InventoryConfig) -> Vec<Box<dyn ContentProvider>> {
    vec![
        Box::new(blog::BlogProvider::new(root, &config.blog, &config.site)),
        Box::new(library::LibraryProvider::new(
            root,
            &config.library,
            &config.site,
        )),
    ]
}

/// Replace `provider`'s placeholder route with one entry per item.
///
/// Content entries point at the placeholder's page file when it was
/// collected, otherwise at the app directory. Returns the number of entries
/// added.
pub fn expand(
    routes: &mut Vec<RouteEntry>,
    provider: &dyn ContentProvider,
    app_dir: &Path,
) -> Result<usize, ContentError> {
    let items = provider.items()?;
    let placeholder = provider.placeholder();

    let file_path = match routes.iter().position(|r| r.route == placeholder) {
        Some(idx) => routes.remove(idx).file_path,
        None => {
            debug!(
                "no {} route in app tree, adding {} {} routes anyway",
                placeholder,
                items.len(),
                provider.source()
            );
            app_dir.to_path_buf()
        }
    };

    let added = items.len();
    routes.extend(items.into_iter().map(|item| RouteEntry {
        route: provider.route_for(&item.slug),
        file_path: file_path.clone(),
        kind: RouteKind::Content {
            source: provider.source(),
            item,
        },
    }));
    Ok(added)
}

/// Cut `text` to at most `max` characters, ending in `…` when shortened.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
