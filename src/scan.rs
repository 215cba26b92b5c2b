//! Route discovery.
//!
//! Walks the App Router tree and turns every page entry point into a
//! [`RouteEntry`]. Directory naming is interpreted by [`crate::naming`].
//!
//! ```text
//! app/
//! ├── page.tsx                      → /
//! ├── (marketing)/
//! │   └── about/page.tsx            → /about
//! ├── blog/
//! │   ├── page.tsx                  → /blog
//! │   └── [slug]/page.tsx           → /blog/[slug]   (placeholder)
//! ├── @modal/login/page.tsx         → /login
//! ├── api/contact/route.ts          (skipped)
//! └── _components/hero.tsx          (skipped)
//! ```
//!
//! Each route appears once. When two page files land on the same route
//! (`page.tsx` next to `page.js`, or the same path reached through two route
//! groups), the page with the preferred extension wins, then the first in
//! walk order.

use crate::naming;
use crate::types::{RouteEntry, RouteKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("App directory not found: {0}")]
    MissingAppDir(PathBuf),
    #[error("Error walking app directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Collect every page route under `app_dir`, sorted by route.
pub fn collect_routes(app_dir: &Path) -> Result<Vec<RouteEntry>, ScanError> {
    if !app_dir.is_dir() {
        return Err(ScanError::MissingAppDir(app_dir.to_path_buf()));
    }

    let mut found: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();
    let walker = WalkDir::new(app_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !naming::is_skipped_dir(&e.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(priority) = naming::page_file_priority(&entry.file_name().to_string_lossy())
        else {
            continue;
        };

        let route = route_for_page(app_dir, entry.path());
        let shadowed = found
            .get(&route)
            .is_some_and(|(existing, _)| *existing <= priority);
        if shadowed {
            debug!("{} shadowed for {route}", entry.path().display());
        } else {
            found.insert(route, (priority, entry.path().to_path_buf()));
        }
    }

    Ok(found
        .into_iter()
        .map(|(route, (_, file_path))| RouteEntry {
            route,
            file_path,
            kind: RouteKind::Static,
        })
        .collect())
}

/// URL route of a page file, from the directories between `app_dir` and it.
fn route_for_page(app_dir: &Path, page: &Path) -> String {
    let segments: Vec<String> = page
        .parent()
        .and_then(|dir| dir.strip_prefix(app_dir).ok())
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    naming::route_path(&segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default function Page() { return null }").unwrap();
    }

    fn routes(app: &Path) -> Vec<String> {
        collect_routes(app)
            .unwrap()
            .into_iter()
            .map(|r| r.route)
            .collect()
    }

    #[test]
    fn root_page_is_slash() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "page.tsx");
        assert_eq!(routes(tmp.path()), vec!["/"]);
    }

    #[test]
    fn nested_pages_and_dynamic_placeholders() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "page.tsx");
        touch(tmp.path(), "blog/page.tsx");
        touch(tmp.path(), "blog/[slug]/page.tsx");
        touch(tmp.path(), "pricing/page.jsx");
        assert_eq!(
            routes(tmp.path()),
            vec!["/", "/blog", "/blog/[slug]", "/pricing"]
        );
    }

    #[test]
    fn groups_and_slots_are_elided() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "(marketing)/about/page.tsx");
        touch(tmp.path(), "@modal/login/page.tsx");
        assert_eq!(routes(tmp.path()), vec!["/about", "/login"]);
    }

    #[test]
    fn skipped_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "api/contact/page.ts");
        touch(tmp.path(), "_components/page.tsx");
        touch(tmp.path(), ".next/page.js");
        touch(tmp.path(), "node_modules/x/page.js");
        touch(tmp.path(), "services/page.tsx");
        assert_eq!(routes(tmp.path()), vec!["/services"]);
    }

    #[test]
    fn non_page_files_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "contact/layout.tsx");
        touch(tmp.path(), "contact/page.module.css");
        touch(tmp.path(), "contact/page.test.tsx");
        touch(tmp.path(), "contact/route.ts");
        assert!(routes(tmp.path()).is_empty());
    }

    #[test]
    fn duplicate_route_keeps_preferred_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "about/page.js");
        touch(tmp.path(), "about/page.tsx");
        let collected = collect_routes(tmp.path()).unwrap();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].file_path, tmp.path().join("about/page.tsx"));
    }

    #[test]
    fn duplicate_route_across_groups_keeps_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "(a)/about/page.tsx");
        touch(tmp.path(), "(b)/about/page.tsx");
        let collected = collect_routes(tmp.path()).unwrap();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].file_path, tmp.path().join("(a)/about/page.tsx"));
    }

    #[test]
    fn entries_are_static() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "page.tsx");
        let collected = collect_routes(tmp.path()).unwrap();
        assert_eq!(collected[0].kind, RouteKind::Static);
        assert_eq!(collected[0].slug(), None);
    }

    #[test]
    fn missing_app_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_routes(&tmp.path().join("app"));
        assert!(matches!(result, Err(ScanError::MissingAppDir(_))));
    }
}
