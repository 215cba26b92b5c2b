//! Inventory configuration module.
//!
//! Handles loading and validating `seo-inventory.toml`. The tool runs with
//! no configuration at all: stock defaults describe the layout of the agency
//! site (`app/`, `content/blog/`, `content/library/seed.ts`) and a user file
//! in the project root overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! app_dir = "app"                   # App Router root, relative to the project
//! output = "seo/inventory.csv"      # Report destination (overwritten every run)
//!
//! [site]
//! canonical_host = "www.design-prism.com"
//! brand_suffix = " | prism"
//! title_max_length = 60             # Blog titles never exceed this
//!
//! [blog]
//! dir = "content/blog"
//! extensions = ["mdx"]
//! placeholder = "/blog/[slug]"
//!
//! [library]
//! seed = "content/library/seed.ts"
//! export = "librarySeedPosts"
//! placeholder = "/library/[slug]"
//! caption_title_max_length = 80
//!
//! [markers]
//! structured_data = ["CaseStudySchema", "ServiceSchema", ...]
//! heading_components = ["SeoHero", "PricingHero", "MinimalCaseStudyPage"]
//!
//! [audit]
//! title_min = 25
//! title_max = 65
//! description_min = 70
//! description_max = 170
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Marker lists replace the stock list wholesale,
//! so a site that adds a schema component must repeat the ones it keeps.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "seo-inventory.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Inventory configuration loaded from `seo-inventory.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    /// App Router root directory, relative to the project root.
    pub app_dir: String,
    /// CSV destination, relative to the project root.
    pub output: String,
    pub site: SiteConfig,
    pub blog: BlogConfig,
    pub library: LibraryConfig,
    pub markers: MarkersConfig,
    pub audit: AuditConfig,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            app_dir: "app".to_string(),
            output: "seo/inventory.csv".to_string(),
            site: SiteConfig::default(),
            blog: BlogConfig::default(),
            library: LibraryConfig::default(),
            markers: MarkersConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl InventoryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.canonical_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.canonical_host must not be empty".into(),
            ));
        }
        if self.site.brand_suffix.chars().count() >= self.site.title_max_length {
            return Err(ConfigError::Validation(
                "site.brand_suffix must be shorter than site.title_max_length".into(),
            ));
        }
        for (key, placeholder) in [
            ("blog.placeholder", &self.blog.placeholder),
            ("library.placeholder", &self.library.placeholder),
        ] {
            if !placeholder.starts_with('/') || !placeholder.contains('[') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a route with a dynamic segment, e.g. /blog/[slug]"
                )));
            }
        }
        if self.blog.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "blog.extensions must not be empty".into(),
            ));
        }
        if self.library.caption_title_max_length == 0 {
            return Err(ConfigError::Validation(
                "library.caption_title_max_length must be non-zero".into(),
            ));
        }
        if self.audit.title_min > self.audit.title_max {
            return Err(ConfigError::Validation(
                "audit.title_min must not exceed audit.title_max".into(),
            ));
        }
        if self.audit.description_min > self.audit.description_max {
            return Err(ConfigError::Validation(
                "audit.description_min must not exceed audit.description_max".into(),
            ));
        }
        Ok(())
    }

    pub fn app_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.app_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }
}

/// Production site identity used for canonical URLs and titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Hostname every canonical URL is rewritten to.
    pub canonical_host: String,
    /// Appended to blog titles when it fits within `title_max_length`.
    pub brand_suffix: String,
    /// Upper bound on blog title length, in characters.
    pub title_max_length: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_host: "www.design-prism.com".to_string(),
            brand_suffix: " | prism".to_string(),
            title_max_length: 60,
        }
    }
}

impl SiteConfig {
    /// `https://<host><path>`, with a leading slash inserted when missing.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("https://{}{}", self.canonical_host, path)
        } else {
            format!("https://{}/{}", self.canonical_host, path)
        }
    }
}

/// Blog post source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Directory of markdown posts, one file per slug.
    pub dir: String,
    /// File extensions (without dot) treated as posts.
    pub extensions: Vec<String>,
    /// Dynamic route replaced by one route per post.
    pub placeholder: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            dir: "content/blog".to_string(),
            extensions: vec!["mdx".to_string()],
            placeholder: "/blog/[slug]".to_string(),
        }
    }
}

/// Short-form content library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// TypeScript file holding the seed array.
    pub seed: String,
    /// Name of the exported array constant.
    pub export: String,
    /// Dynamic route replaced by one route per seed post.
    pub placeholder: String,
    /// Caption-derived titles are cut to this many characters, ellipsis included.
    pub caption_title_max_length: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            seed: "content/library/seed.ts".to_string(),
            export: "librarySeedPosts".to_string(),
            placeholder: "/library/[slug]".to_string(),
            caption_title_max_length: 80,
        }
    }
}

/// Component-name allow-lists used by the heading and structured-data scanner.
///
/// Matching is plain substring search over the route directory's sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkersConfig {
    /// Components that render schema.org JSON-LD.
    pub structured_data: Vec<String>,
    /// Components that render their own `<h1>` at runtime.
    pub heading_components: Vec<String>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }
        Self {
            structured_data: owned(&[
                "CaseStudySchema",
                "MinimalCaseStudyPage",
                "ServiceSchema",
                "BlogPostSchema",
                "HowToSchema",
                "VideoObjectSchema",
                "VideoSchema",
                "FAQSchema",
                "FAQSection",
                "PersonSchema",
                "OrganizationSchema",
                "ContactPageSchema",
                "CollectionPageSchema",
                "ItemListSchema",
                "JobPostingSchema",
                "PodcastSeriesSchema",
                "PodcastEpisodeSchema",
                "ProductSchema",
                "WebPageSchema",
                "LocalBusinessSchema",
                "GlobalSchemaGraph",
            ]),
            heading_components: owned(&["SeoHero", "PricingHero", "MinimalCaseStudyPage"]),
        }
    }
}

/// Length thresholds for the `check` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub title_min: usize,
    pub title_max: usize,
    pub description_min: usize,
    pub description_max: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            title_min: 25,
            title_max: 65,
            description_min: 70,
            description_max: 170,
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse config text. Missing keys take the stock defaults through
/// `#[serde(default)]`; the result is validated.
pub fn parse_config(content: &str) -> Result<InventoryConfig, ConfigError> {
    let config: InventoryConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `seo-inventory.toml` from the project root, or an explicit file.
///
/// A missing root file yields the stock defaults. A missing explicit file is
/// an error.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<InventoryConfig, ConfigError> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::Validation(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => root.join(CONFIG_FILE),
    };
    if !path.exists() {
        return Ok(InventoryConfig::default());
    }
    parse_config(&fs::read_to_string(&path)?)
}

/// Returns a fully-commented stock `seo-inventory.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# SEO Inventory Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the project root.
# Unknown keys will cause an error.

# App Router root directory.
app_dir = "app"

# Report destination. Overwritten on every run.
output = "seo/inventory.csv"

# ---------------------------------------------------------------------------
# Production site
# ---------------------------------------------------------------------------
[site]
# Every canonical URL is rewritten to this host.
canonical_host = "www.design-prism.com"

# Appended to lower-cased blog titles only when the result still fits.
brand_suffix = " | prism"

# Blog titles never exceed this many characters.
title_max_length = 60

# ---------------------------------------------------------------------------
# Blog posts (one route per markdown file)
# ---------------------------------------------------------------------------
[blog]
dir = "content/blog"
extensions = ["mdx"]
placeholder = "/blog/[slug]"

# ---------------------------------------------------------------------------
# Content library (one route per seed post)
# ---------------------------------------------------------------------------
[library]
seed = "content/library/seed.ts"
export = "librarySeedPosts"
placeholder = "/library/[slug]"

# Titles derived from captions are cut to this length, ellipsis included.
caption_title_max_length = 80

# ---------------------------------------------------------------------------
# Marker components (substring match; a list replaces the stock list)
# ---------------------------------------------------------------------------
[markers]
structured_data = [
    "CaseStudySchema", "MinimalCaseStudyPage", "ServiceSchema", "BlogPostSchema",
    "HowToSchema", "VideoObjectSchema", "VideoSchema", "FAQSchema", "FAQSection",
    "PersonSchema", "OrganizationSchema", "ContactPageSchema", "CollectionPageSchema",
    "ItemListSchema", "JobPostingSchema", "PodcastSeriesSchema", "PodcastEpisodeSchema",
    "ProductSchema", "WebPageSchema", "LocalBusinessSchema", "GlobalSchemaGraph",
]

# Components that render their own <h1> at runtime.
heading_components = ["SeoHero", "PricingHero", "MinimalCaseStudyPage"]

# ---------------------------------------------------------------------------
# Audit thresholds (used by `seo-inventory check`)
# ---------------------------------------------------------------------------
[audit]
title_min = 25
title_max = 65
description_min = 70
description_max = 170
"##
}
