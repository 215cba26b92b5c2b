//! Shared test utilities for the seo-inventory test suite.
//!
//! Provides a throwaway copy of the fixture site, small file builders, and
//! lookups over routes and report rows.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! write_file(tmp.path(), "app/careers/page.tsx", "export default () => <h1>join</h1>");
//!
//! let rows = build_inventory(tmp.path(), &InventoryConfig::default()).unwrap();
//! assert_eq!(find_row(&rows, "/careers").h1, "join");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{InventoryRow, RouteEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a report row by route. Panics if not found.
pub fn find_row<'a>(rows: &'a [InventoryRow], route: &str) -> &'a InventoryRow {
    rows.iter().find(|r| r.route == route).unwrap_or_else(|| {
        let routes: Vec<&str> = rows.iter().map(|r| r.route.as_str()).collect();
        panic!("row '{route}' not found. Available: {routes:?}")
    })
}

/// All routes in order.
pub fn route_names(routes: &[RouteEntry]) -> Vec<&str> {
    routes.iter().map(|r| r.route.as_str()).collect()
}
