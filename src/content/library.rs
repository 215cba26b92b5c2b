//! Library shorts, read from the seed module that backs `/library/[slug]`.
//!
//! ```ts
//! export const librarySeedPosts = [
//!   { id: "C9x1", platform: "instagram", title: "Reviews Beat Ads", caption: "..." },
//!   { id: "7312", platform: "tiktok", caption: null },
//! ]
//! ```
//!
//! The seed is parsed, never executed. Elements that are not object
//! literals, or whose `id`/`platform` do not resolve to strings, are skipped.

use super::{ContentError, ContentProvider, truncate_with_ellipsis};
use crate::config::{LibraryConfig, SiteConfig};
use crate::metadata::resolve;
use crate::script::{self, Script};
use crate::types::{ContentItem, ContentSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FALLBACK_TITLE: &str = "prism library short";

/// One seed record as written in the module. Unresolvable fields are `None`;
/// a `null` caption is `None` too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySeedPost {
    pub id: Option<String>,
    pub platform: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
}

pub struct LibraryProvider {
    seed: PathBuf,
    export: String,
    placeholder: String,
    caption_title_max_length: usize,
    site: SiteConfig,
}

impl LibraryProvider {
    pub fn new(root: &Path, library: &LibraryConfig, site: &SiteConfig) -> Self {
        Self {
            seed: root.join(&library.seed),
            export: library.export.clone(),
            placeholder: library.placeholder.clone(),
            caption_title_max_length: library.caption_title_max_length,
            site: site.clone(),
        }
    }

    /// Derive the content item for a seed record, or `None` if it has no
    /// `id` or `platform`.
    pub fn item(&self, post: &LibrarySeedPost) -> Option<ContentItem> {
        let id = resolve(&[post.id.as_deref()])?;
        let platform = resolve(&[post.platform.as_deref()])?;
        let slug = format!("{platform}-{id}");

        let caption_line = post
            .caption
            .as_deref()
            .and_then(first_line)
            .map(|line| truncate_with_ellipsis(line, self.caption_title_max_length));
        let title = resolve(&[post.title.as_deref(), caption_line.as_deref()])
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let description = resolve(&[post.caption.as_deref()])
            .unwrap_or_else(|| format!("Short lesson from the Prism library: {title}."));

        Some(ContentItem {
            canonical: self.site.absolute_url(&self.route_for(&slug)),
            slug,
            h1: title.clone(),
            title,
            description: Some(description),
        })
    }
}

impl ContentProvider for LibraryProvider {
    fn source(&self) -> ContentSource {
        ContentSource::Library
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn items(&self) -> Result<Vec<ContentItem>, ContentError> {
        if !self.seed.is_file() {
            warn!("library seed {} not found, no shorts added", self.seed.display());
            return Ok(Vec::new());
        }

        let script = Script::load(&self.seed)?;
        let posts = seed_posts(&script, &self.export);
        let items: Vec<ContentItem> = posts.iter().filter_map(|p| self.item(p)).collect();
        debug!(
            "library seed: {} records, {} usable",
            posts.len(),
            items.len()
        );
        Ok(items)
    }
}

/// Records of `export const <export> = [...]`, object literals only.
pub fn seed_posts(script: &Script, export: &str) -> Vec<LibrarySeedPost> {
    let Some(elements) = script
        .exported_const(export)
        .and_then(script::array_elements)
    else {
        warn!(
            "{} has no `export const {export} = [...]`",
            script.path().display()
        );
        return Vec::new();
    };

    let consts = script.const_strings();
    elements
        .into_iter()
        .filter(|el| script::is_object(*el))
        .map(|obj| {
            let caption = script
                .property(obj, "caption")
                .filter(|node| !script::is_null(*node))
                .and_then(|node| script.resolve_string(node, &consts));
            LibrarySeedPost {
                id: script.string_property(obj, "id", &consts),
                platform: script.string_property(obj, "platform", &consts),
                title: script.string_property(obj, "title", &consts),
                caption,
            }
        })
        .collect()
}

/// First non-empty line, trimmed.
fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}
