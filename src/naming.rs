//! Centralized parsing for App Router file and directory naming conventions.
//!
//! Every directory under `app/` is a route segment, but not every segment
//! shows up in the URL:
//!
//! - `about` → a plain segment, kept as-is
//! - `(marketing)` → a route group, traversed but elided from the URL
//! - `@modal` → a parallel-route slot, traversed but elided from the URL
//! - `[slug]`, `[...slug]`, `[[...slug]]` → dynamic segments, kept verbatim
//!   so content providers can find and replace the placeholder route
//!
//! Some directories are not routable at all and are never walked:
//! `api` (route handlers only), `_private` folders, hidden directories, and
//! `node_modules`.

/// File stems that mark a directory as a page entry point, by extension.
///
/// Order matters: when a directory holds more than one page file, the
/// earlier extension wins.
pub const PAGE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// A single parsed route segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Plain segment that appears in the URL.
    Static(String),
    /// `(name)`: organizes routes without affecting the URL.
    Group(String),
    /// `@name`: parallel-route slot, not part of the URL.
    Slot(String),
    /// `[param]`, `[...param]` or `[[...param]]`.
    Dynamic { param: String, catch_all: bool },
}

impl Segment {
    /// Whether this segment contributes to the URL path.
    pub fn in_url(&self) -> bool {
        matches!(self, Segment::Static(_) | Segment::Dynamic { .. })
    }
}

/// Parse a directory name into a [`Segment`].
///
/// - `"about"` → `Static("about")`
/// - `"(marketing)"` → `Group("marketing")`
/// - `"@modal"` → `Slot("modal")`
/// - `"[slug]"` → `Dynamic { param: "slug", catch_all: false }`
/// - `"[...parts]"` / `"[[...parts]]"` → `Dynamic { param: "parts", catch_all: true }`
pub fn parse_segment(name: &str) -> Segment {
    if name.starts_with('(') {
        let inner = name.trim_start_matches('(').trim_end_matches(')');
        return Segment::Group(inner.to_string());
    }
    if let Some(slot) = name.strip_prefix('@') {
        return Segment::Slot(slot.to_string());
    }
    if name.starts_with('[') && name.ends_with(']') {
        let inner = name.trim_start_matches('[').trim_end_matches(']');
        return match inner.strip_prefix("...") {
            Some(param) => Segment::Dynamic {
                param: param.to_string(),
                catch_all: true,
            },
            None => Segment::Dynamic {
                param: inner.to_string(),
                catch_all: false,
            },
        };
    }
    Segment::Static(name.to_string())
}

/// Directories the route walker never descends into.
pub fn is_skipped_dir(name: &str) -> bool {
    name == "api" || name == "node_modules" || name.starts_with('_') || name.starts_with('.')
}

/// Whether a file name is a page entry point (`page.tsx`, `page.js`, ...).
///
/// Returns the priority of the match (lower wins) so callers can pick one
/// page file per directory.
pub fn page_file_priority(file_name: &str) -> Option<usize> {
    let ext = file_name.strip_prefix("page.")?;
    PAGE_EXTENSIONS.iter().position(|e| *e == ext)
}

/// Build a URL path from directory segments, relative to the app root.
///
/// Group and slot segments are dropped; an empty result maps to `/`.
pub fn route_path<S: AsRef<str>>(segments: &[S]) -> String {
    let kept: Vec<&str> = segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| parse_segment(s).in_url())
        .collect();
    if kept.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", kept.join("/"))
    }
}

/// Replace the last dynamic segment of a placeholder route with `slug`.
///
/// `"/blog/[slug]"` + `"hello"` → `"/blog/hello"`. A placeholder without a
/// dynamic segment gets the slug appended as a new segment.
pub fn fill_dynamic_segment(placeholder: &str, slug: &str) -> String {
    let mut parts: Vec<&str> = placeholder.split('/').collect();
    let dynamic = parts
        .iter()
        .rposition(|p| matches!(parse_segment(p), Segment::Dynamic { .. }));
    match dynamic {
        Some(idx) => {
            parts[idx] = slug;
            parts.join("/")
        }
        None => format!("{}/{}", placeholder.trim_end_matches('/'), slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_segment_is_static() {
        assert_eq!(parse_segment("about"), Segment::Static("about".into()));
    }

    #[test]
    fn parenthesized_segment_is_group() {
        assert_eq!(
            parse_segment("(marketing)"),
            Segment::Group("marketing".into())
        );
        assert!(!parse_segment("(marketing)").in_url());
    }

    #[test]
    fn at_segment_is_slot() {
        assert_eq!(parse_segment("@modal"), Segment::Slot("modal".into()));
        assert!(!parse_segment("@modal").in_url());
    }

    #[test]
    fn bracket_segments_are_dynamic() {
        assert_eq!(
            parse_segment("[slug]"),
            Segment::Dynamic {
                param: "slug".into(),
                catch_all: false
            }
        );
        assert_eq!(
            parse_segment("[[...parts]]"),
            Segment::Dynamic {
                param: "parts".into(),
                catch_all: true
            }
        );
        assert!(parse_segment("[slug]").in_url());
    }

    #[test]
    fn skipped_dirs() {
        assert!(is_skipped_dir("api"));
        assert!(is_skipped_dir("_components"));
        assert!(is_skipped_dir(".next"));
        assert!(is_skipped_dir("node_modules"));
        assert!(!is_skipped_dir("about"));
        assert!(!is_skipped_dir("(marketing)"));
        assert!(!is_skipped_dir("apis"));
    }

    #[test]
    fn page_file_priority_prefers_tsx() {
        assert_eq!(page_file_priority("page.tsx"), Some(0));
        assert_eq!(page_file_priority("page.js"), Some(3));
        assert_eq!(page_file_priority("page.mdx"), None);
        assert_eq!(page_file_priority("layout.tsx"), None);
        assert_eq!(page_file_priority("mypage.tsx"), None);
    }

    #[test]
    fn route_path_root() {
        let empty: [&str; 0] = [];
        assert_eq!(route_path(&empty), "/");
    }

    #[test]
    fn route_path_elides_groups_and_slots() {
        assert_eq!(route_path(&["(marketing)", "about"]), "/about");
        assert_eq!(route_path(&["dashboard", "@modal", "settings"]), "/dashboard/settings");
        assert_eq!(route_path(&["(site)"]), "/");
    }

    #[test]
    fn route_path_keeps_dynamic_segments() {
        assert_eq!(route_path(&["blog", "[slug]"]), "/blog/[slug]");
    }

    #[test]
    fn fill_dynamic_replaces_placeholder() {
        assert_eq!(fill_dynamic_segment("/blog/[slug]", "hello"), "/blog/hello");
        assert_eq!(
            fill_dynamic_segment("/library/[slug]", "instagram-1"),
            "/library/instagram-1"
        );
    }

    #[test]
    fn fill_dynamic_appends_without_placeholder() {
        assert_eq!(fill_dynamic_segment("/blog/", "hello"), "/blog/hello");
    }
}
