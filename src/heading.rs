//! First-heading and structured-data detection for a route directory.
//!
//! This is a best-effort text heuristic, not an analysis. Page directories
//! in the site hold the page itself plus co-located client components
//! (`client-page.tsx`, `hero.tsx`, ...) and the first `<h1>` usually lives in
//! one of them. All source-like files are scanned in file-name order.
//!
//! Two sentinels survive from the spreadsheet this report feeds:
//!
//! - `"dynamic"`: an `<h1>` exists but its content is only expressions
//!   (`<h1>{post.title}</h1>`)
//! - `"component"`: no `<h1>` in the directory, but it uses a component
//!   known to render its own heading (`SeoHero`, `PricingHero`, ...)
//!
//! Structured data is detected the same way: the directory's sources
//! mention one of the schema components from the marker list.

use crate::config::MarkersConfig;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const DYNAMIC_HEADING: &str = "dynamic";
pub const COMPONENT_HEADING: &str = "component";

const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mdx"];

/// `<h1 ...>...</h1>`, optionally namespaced (`<motion.h1>`), across lines.
static H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:[\w$]+\.)?h1(?:\s[^>]*)?>(.*?)</(?:[\w$]+\.)?h1>")
        .expect("h1 pattern is valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("expression pattern is valid"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&[a-z]+;").expect("entity pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// What the scanner found in one route directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingScan {
    /// Cleaned heading text, or one of the sentinels.
    pub heading: Option<String>,
    pub structured_data: bool,
}

/// Scan a route directory for its first heading and structured data.
pub fn scan_route_dir(dir: &Path, markers: &MarkersConfig) -> io::Result<HeadingScan> {
    let files = source_files(dir)?;

    let mut heading_sources = Vec::new();
    let mut all_sources = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file)?;
        if !is_special_file(file) {
            heading_sources.push(text.clone());
        }
        all_sources.push(text);
    }

    Ok(HeadingScan {
        heading: find_heading(&heading_sources, &markers.heading_components),
        structured_data: has_marker(&all_sources.join("\n"), &markers.structured_data),
    })
}

/// Source-like files directly inside `dir`, sorted by name.
fn source_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Layouts, loading states and error boundaries wrap the page; their
/// headings are not the page's.
fn is_special_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with("layout.")
        || name.starts_with("loading.")
        || name.starts_with("error.")
        || name.contains("not-found")
        || name.contains("global-error")
}

/// First heading across `sources`, in order, with the component fallback.
pub fn find_heading<S: AsRef<str>>(sources: &[S], heading_components: &[String]) -> Option<String> {
    for source in sources {
        if let Some(captures) = H1.captures(source.as_ref()) {
            let inner = captures.get(1).map_or("", |m| m.as_str());
            let cleaned = clean_heading(inner);
            return Some(if cleaned.is_empty() {
                DYNAMIC_HEADING.to_string()
            } else {
                cleaned
            });
        }
    }

    let combined = sources
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    if has_marker(&combined, heading_components) {
        return Some(COMPONENT_HEADING.to_string());
    }
    None
}

/// Strip tags, JSX expressions and HTML entities, then collapse whitespace.
pub fn clean_heading(inner: &str) -> String {
    let text = TAG.replace_all(inner, " ");
    let text = EXPRESSION.replace_all(&text, " ");
    let text = ENTITY.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Plain substring match against a marker list.
pub fn has_marker(content: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| !m.is_empty() && content.contains(m.as_str()))
}
