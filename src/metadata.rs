//! Route metadata extraction and resolution.
//!
//! A page declares its SEO fields through Next.js' static metadata export:
//!
//! ```tsx
//! const PAGE_TITLE = "dental website design"
//!
//! export const metadata: Metadata = {
//!   title: { default: PAGE_TITLE, template: "%s | prism" },
//!   description: `websites for ${PRACTICE} practices`,
//!   alternates: { canonical: "https://www.design-prism.com/dental-website" },
//!   robots: { index: false, follow: true },
//! }
//! ```
//!
//! Each field is resolved independently through [`crate::script`]. A field
//! that is computed at runtime is left out of [`MetadataInfo`] rather than
//! guessed at; the report renders it as an empty cell.
//!
//! ## Field rules
//!
//! - **title**: a string, or an object whose `default` wins over `absolute`
//! - **description**: a string
//! - **canonical**: `alternates.canonical`, verbatim
//! - **robots**: a string verbatim, or `{ index: <bool literal> }` mapped to
//!   `"index"` / `"noindex"`
//!
//! Pages built with the shared `buildRouteMetadata({ titleStem, description,
//! path, index })` helper are understood too: the helper's arguments map onto
//! the same fields, with `path` turned into a production canonical URL.

use crate::config::SiteConfig;
use crate::script::{self, ConstStrings, Script, ScriptError};
use serde::Serialize;
use std::path::Path;
use tree_sitter::Node;
use url::Url;

/// Name of the shared metadata builder recognised in place of an object.
pub const ROUTE_METADATA_HELPER: &str = "buildRouteMetadata";

/// Statically determinable metadata for one page. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
}

/// Resolve a field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
///
/// ```text
/// blog h1:       resolve(&[h1_title, title])
/// library title: resolve(&[title, caption_line])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Rewrite an absolute URL onto the production host over https.
///
/// Path, query and fragment are preserved; any port is dropped. Returns
/// `None` when `raw` is not an absolute URL that can carry a host, so
/// callers can fall back to a synthesized canonical.
pub fn canonical_url(raw: &str, host: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    url.set_host(Some(host)).ok()?;
    url.set_port(None).ok()?;
    url.set_scheme("https").ok()?;
    Some(url.to_string())
}

/// Read a page file and extract its metadata.
pub fn extract_metadata(path: &Path, site: &SiteConfig) -> Result<MetadataInfo, ScriptError> {
    let script = Script::load(path)?;
    Ok(metadata_from_script(&script, site))
}

/// Extract metadata from an already parsed page.
///
/// Returns an empty [`MetadataInfo`] when there is no `export const metadata`,
/// or when it is neither an object literal nor a helper call.
pub fn metadata_from_script(script: &Script, site: &SiteConfig) -> MetadataInfo {
    let consts = script.const_strings();
    let Some(init) = script.exported_const("metadata") else {
        return MetadataInfo::default();
    };

    if script::is_object(init) {
        return from_object(script, init, &consts);
    }

    if let Some((callee, args)) = script.call(init)
        && callee == ROUTE_METADATA_HELPER
        && let Some(arg) = args.first().copied()
        && script::is_object(arg)
    {
        return from_helper_call(script, arg, &consts, site);
    }

    tracing::debug!(
        path = %script.path().display(),
        "metadata export is not a literal object"
    );
    MetadataInfo::default()
}

fn from_object(script: &Script, obj: Node<'_>, consts: &ConstStrings) -> MetadataInfo {
    let title = script.property(obj, "title").and_then(|title| {
        if script::is_object(title) {
            script
                .string_property(title, "default", consts)
                .or_else(|| script.string_property(title, "absolute", consts))
        } else {
            script.resolve_string(title, consts)
        }
    });

    let canonical = script
        .property(obj, "alternates")
        .and_then(|alternates| script.string_property(alternates, "canonical", consts));

    let robots = script
        .property(obj, "robots")
        .and_then(|robots| robots_value(script, robots, consts));

    MetadataInfo {
        title,
        description: script.string_property(obj, "description", consts),
        canonical,
        robots,
    }
}

fn robots_value(script: &Script, node: Node<'_>, consts: &ConstStrings) -> Option<String> {
    if script::is_object(node) {
        let index = script
            .property(node, "index")
            .and_then(script::bool_literal)?;
        return Some(if index { "index" } else { "noindex" }.to_string());
    }
    script.resolve_string(node, consts)
}

fn from_helper_call(
    script: &Script,
    arg: Node<'_>,
    consts: &ConstStrings,
    site: &SiteConfig,
) -> MetadataInfo {
    let canonical = script.string_property(arg, "path", consts).map(|path| {
        canonical_url(&path, &site.canonical_host).unwrap_or_else(|| site.absolute_url(&path))
    });
    let noindex = script
        .property(arg, "index")
        .and_then(script::bool_literal)
        == Some(false);

    MetadataInfo {
        title: script.string_property(arg, "titleStem", consts),
        description: script.string_property(arg, "description", consts),
        canonical,
        robots: Some(if noindex { "noindex" } else { "index" }.to_string()),
    }
}
