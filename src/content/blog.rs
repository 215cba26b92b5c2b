//! Blog posts: one markdown file per slug with YAML frontmatter.
//!
//! ```text
//! content/blog/
//! ├── local-seo-for-dentists.mdx    → /blog/local-seo-for-dentists
//! └── why-speed-matters.mdx         → /blog/why-speed-matters
//! ```
//!
//! Recognised frontmatter keys: `title`, `description`, `seoTitle`,
//! `seoDescription`, `canonical`, `h1Title`. The `seo*` keys win over their
//! plain counterparts for the row; the heading never reads them. Anything
//! else is ignored.

use super::{ContentError, ContentProvider, truncate_with_ellipsis};
use crate::config::{BlogConfig, SiteConfig};
use crate::metadata::{canonical_url, resolve};
use crate::types::{ContentItem, ContentSource};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FALLBACK_TITLE: &str = "blog post";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogFrontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub canonical: Option<String>,
    pub h1_title: Option<String>,
}

pub struct BlogProvider {
    dir: PathBuf,
    extensions: Vec<String>,
    placeholder: String,
    site: SiteConfig,
}

impl BlogProvider {
    pub fn new(root: &Path, blog: &BlogConfig, site: &SiteConfig) -> Self {
        Self {
            dir: root.join(&blog.dir),
            extensions: blog.extensions.clone(),
            placeholder: blog.placeholder.clone(),
            site: site.clone(),
        }
    }

    /// Post files, sorted by path.
    fn post_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| ContentError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| self.extensions.iter().any(|x| x == e))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Absolute URLs move to the production host; root-relative paths are
    /// resolved against it.
    fn canonical(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        canonical_url(raw, &self.site.canonical_host)
            .or_else(|| raw.starts_with('/').then(|| self.site.absolute_url(raw)))
    }

    fn item(&self, slug: &str, frontmatter: BlogFrontmatter) -> ContentItem {
        let route = self.route_for(slug);
        let raw_title = resolve(&[
            frontmatter.seo_title.as_deref(),
            frontmatter.title.as_deref(),
        ])
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let canonical = frontmatter
            .canonical
            .as_deref()
            .and_then(|c| self.canonical(c))
            .unwrap_or_else(|| self.site.absolute_url(&route));
        let h1 = resolve(&[
            frontmatter.h1_title.as_deref(),
            frontmatter.title.as_deref(),
        ])
        .unwrap_or_default();

        ContentItem {
            slug: slug.to_string(),
            title: blog_title(&raw_title, &self.site),
            description: resolve(&[
                frontmatter.seo_description.as_deref(),
                frontmatter.description.as_deref(),
            ]),
            canonical,
            h1,
        }
    }
}

impl ContentProvider for BlogProvider {
    fn source(&self) -> ContentSource {
        ContentSource::Blog
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn items(&self) -> Result<Vec<ContentItem>, ContentError> {
        if !self.dir.is_dir() {
            warn!("blog directory {} not found, no posts added", self.dir.display());
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for path in self.post_files()? {
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let raw = fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            let frontmatter = parse_frontmatter(&raw).map_err(|source| {
                ContentError::Frontmatter {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("blog post {slug}");
            items.push(self.item(slug, frontmatter));
        }
        Ok(items)
    }
}

/// Blog page title: lower-cased, branded when the suffix fits, truncated
/// when even the bare title does not.
///
/// With the default 60-character limit and `" | prism"` suffix:
///
/// ```text
/// ≤ 52 chars   "<title> | prism"
/// 53..=60      "<title>"
/// > 60         first 59 chars + "…"
/// ```
pub fn blog_title(raw: &str, site: &SiteConfig) -> String {
    let title = raw.trim().to_lowercase();
    let len = title.chars().count();
    let max = site.title_max_length;

    if len + site.brand_suffix.chars().count() <= max {
        format!("{title}{}", site.brand_suffix)
    } else if len <= max {
        title
    } else {
        truncate_with_ellipsis(&title, max)
    }
}

/// YAML between a leading `---` line and the next `---` line.
pub fn split_frontmatter(raw: &str) -> Option<&str> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&raw[start..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse a post's frontmatter. A post without a frontmatter block gets
/// empty fields.
pub fn parse_frontmatter(raw: &str) -> Result<BlogFrontmatter, serde_yaml::Error> {
    match split_frontmatter(raw) {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml),
        _ => Ok(BlogFrontmatter::default()),
    }
}
