//! End-to-end run over the fixture site.
//!
//! Copies `fixtures/site/` to a temp directory, runs the full pipeline
//! through the public API, and checks the written report.

use seo_inventory::audit::{self, Indexability, LengthIssue};
use seo_inventory::config::{self, InventoryConfig};
use seo_inventory::inventory;
use seo_inventory::report;
use seo_inventory::types::{ContentSource, InventoryRow, RouteKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_site() -> TempDir {
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

fn row<'a>(rows: &'a [InventoryRow], route: &str) -> &'a InventoryRow {
    rows.iter()
        .find(|r| r.route == route)
        .unwrap_or_else(|| panic!("no row for {route}"))
}

#[test]
fn full_run_writes_expected_routes() {
    let site = setup_site();
    let config = config::load_config(site.path(), None).unwrap();
    let summary = inventory::run(site.path(), &config, None).unwrap();

    let routes: Vec<&str> = summary.rows.iter().map(|r| r.route.as_str()).collect();
    assert_eq!(
        routes,
        vec![
            "/",
            "/about",
            "/blog",
            "/blog/local-seo-for-dentists",
            "/blog/why-speed-matters",
            "/contact",
            "/library/instagram-C9x1",
            "/library/tiktok-7312",
            "/pricing",
            "/thank-you",
        ]
    );
    assert!(site.path().join("seo/inventory.csv").is_file());
}

#[test]
fn static_pages_resolve_metadata() {
    let site = setup_site();
    let rows = inventory::build_inventory(site.path(), &InventoryConfig::default()).unwrap();

    let home = row(&rows, "/");
    assert_eq!(
        home.title,
        "prism | websites, ads and content that grow local businesses"
    );
    assert_eq!(
        home.meta_description,
        "prism builds conversion-focused websites for dentists, consultants and local businesses, then keeps them growing."
    );
    assert_eq!(home.canonical, "https://www.design-prism.com");
    assert_eq!(home.h1, "growth for local businesses");
    assert_eq!(home.robots, "");
    assert!(home.structured_data, "root layout renders the schema graph");

    let blog = row(&rows, "/blog");
    assert_eq!(blog.canonical, "https://www.design-prism.com/blog");
    assert_eq!(blog.h1, "blog");
    assert!(!blog.structured_data);

    let thanks = row(&rows, "/thank-you");
    assert_eq!(thanks.robots, "noindex");
    assert_eq!(thanks.h1, "thank you");
}

#[test]
fn helper_built_metadata_and_component_heading() {
    let site = setup_site();
    let rows = inventory::build_inventory(site.path(), &InventoryConfig::default()).unwrap();

    let pricing = row(&rows, "/pricing");
    assert_eq!(pricing.title, "pricing");
    assert_eq!(pricing.canonical, "https://www.design-prism.com/pricing");
    assert_eq!(pricing.robots, "index");
    assert_eq!(pricing.h1, "component");
    assert!(pricing.structured_data);
}

#[test]
fn blog_and_library_rows() {
    let site = setup_site();
    let rows = inventory::build_inventory(site.path(), &InventoryConfig::default()).unwrap();

    let long = row(&rows, "/blog/why-speed-matters");
    assert_eq!(
        long.title,
        "why \"speed\" matters more than your homepage design for loca…"
    );
    assert_eq!(long.title.chars().count(), 60);
    assert_eq!(long.h1, "why speed matters");
    assert_eq!(
        long.canonical,
        "https://www.design-prism.com/blog/why-speed-matters"
    );

    let short = row(&rows, "/library/tiktok-7312");
    assert_eq!(short.title, "prism library short");
    assert_eq!(short.h1, "prism library short");
    assert_eq!(
        short.meta_description,
        "Short lesson from the Prism library: prism library short."
    );
    assert_eq!(short.robots, "index");
    assert!(short.structured_data);
}

#[test]
fn routes_carry_content_source() {
    let site = setup_site();
    let routes = inventory::discover_routes(site.path(), &InventoryConfig::default()).unwrap();

    let post = routes
        .iter()
        .find(|r| r.route == "/blog/local-seo-for-dentists")
        .unwrap();
    assert!(matches!(
        post.kind,
        RouteKind::Content {
            source: ContentSource::Blog,
            ..
        }
    ));
    assert!(post.file_path.ends_with("app/blog/[slug]/page.tsx"));

    let json = serde_json::to_value(&routes).unwrap();
    assert_eq!(json[0]["route"], "/");
    assert_eq!(json[0]["type"], "static");
}

#[test]
fn report_is_idempotent_and_quoted() {
    let site = setup_site();
    let config = InventoryConfig::default();
    let out = site.path().join("seo/inventory.csv");

    inventory::run(site.path(), &config, None).unwrap();
    let first = fs::read(&out).unwrap();
    inventory::run(site.path(), &config, None).unwrap();
    let second = fs::read(&out).unwrap();
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    assert!(text.starts_with(
        "\"route\",\"title\",\"meta_description\",\"canonical\",\"h1\",\"robots\",\"structured_data\"\n"
    ));
    assert!(text.contains("\"why \"\"speed\"\" matters"));
    assert!(!text.ends_with('\n'));

    let reread = report::read_csv(&out).unwrap();
    assert_eq!(reread.len(), 10);
    assert_eq!(row(&reread, "/contact").h1, "get in touch");
}

#[test]
fn explicit_output_path() {
    let site = setup_site();
    let target = site.path().join("reports/custom.csv");
    let summary =
        inventory::run(site.path(), &InventoryConfig::default(), Some(&target)).unwrap();
    assert_eq!(summary.output, target);
    assert!(target.is_file());
    assert!(!site.path().join("seo").exists());
}

#[test]
fn config_file_overrides_host_and_skips_library() {
    let site = setup_site();
    fs::write(
        site.path().join("seo-inventory.toml"),
        "[site]\ncanonical_host = \"staging.design-prism.com\"\n\n[library]\nseed = \"content/library/missing.ts\"\n",
    )
    .unwrap();

    let config = config::load_config(site.path(), None).unwrap();
    let rows = inventory::build_inventory(site.path(), &config).unwrap();

    assert_eq!(
        row(&rows, "/blog/local-seo-for-dentists").canonical,
        "https://staging.design-prism.com/blog/local-seo-for-dentists"
    );
    assert!(!rows.iter().any(|r| r.route.starts_with("/library")));
}

#[test]
fn audit_over_fixture_rows() {
    let site = setup_site();
    let config = InventoryConfig::default();
    let rows = inventory::build_inventory(site.path(), &config).unwrap();
    let audits = audit::audit_rows(&rows, &config.audit, &config.site.brand_suffix);
    let find = |route: &str| audits.iter().find(|a| a.route == route).unwrap();

    let contact = find("/contact");
    assert_eq!(contact.title, Some(LengthIssue::TooShort));
    assert_eq!(contact.description, Some(LengthIssue::Missing));
    assert!(contact.suffix_not_once);

    let thanks = find("/thank-you");
    assert_eq!(thanks.indexability, Indexability::UtilityNoindex);
    assert!(!thanks.suffix_not_once);

    assert!(!find("/blog/local-seo-for-dentists").suffix_not_once);
    assert!(find("/pricing").suffix_not_once);
}

#[test]
fn missing_app_dir_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(inventory::run(tmp.path(), &InventoryConfig::default(), None).is_err());
}
