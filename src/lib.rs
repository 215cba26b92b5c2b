//! # SEO Inventory
//!
//! Builds an SEO inventory of a Next.js App Router site without running it.
//! Every reachable page becomes one CSV row: title, meta description,
//! canonical URL, first heading, robots directive, and whether the page
//! renders schema.org structured data.
//!
//! # Architecture: Read-Only Pipeline
//!
//! ```text
//! 1. Collect   app/           →  routes            (directory walk)
//! 2. Expand    content/       →  concrete routes   (blog posts, library shorts)
//! 3. Extract   page sources   →  rows              (metadata export, <h1>, markers)
//! 4. Report    rows           →  seo/inventory.csv
//! ```
//!
//! Nothing is executed: TypeScript and TSX are parsed into syntax trees and
//! only statically known values are read. A field computed at runtime comes
//! out as an empty cell rather than a guess.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks `app/` and produces one [`types::RouteEntry`] per page |
//! | [`naming`] | App Router segment conventions: groups, slots, dynamic segments |
//! | [`content`] | Content providers that replace dynamic placeholder routes |
//! | [`script`] | Syntax-tree access and static string resolution for TS/TSX sources |
//! | [`metadata`] | `export const metadata` extraction, canonical URL rewriting |
//! | [`heading`] | First `<h1>` and structured-data marker detection |
//! | [`inventory`] | The pipeline tying the stages together |
//! | [`report`] | CSV rendering, writing and reading |
//! | [`audit`] | Title/description length, brand suffix and indexability flags |
//! | [`config`] | `seo-inventory.toml` loading and validation |
//! | [`types`] | Route and row types shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Syntax Trees, Not Regexes, for Metadata
//!
//! Metadata objects nest, span lines, reference constants and concatenate
//! strings. [`script`] parses sources with tree-sitter and resolves string
//! expressions through a table of top-level constants, so
//! `title: \`${BRAND} | ${TAGLINE}\`` reads the same as a literal.
//!
//! ## Regexes for Headings
//!
//! The first heading is usually rendered by a co-located client component,
//! and JSX structure varies too much to follow statically. [`heading`] scans
//! every source file in the route directory with a pattern instead, and
//! reports two sentinels (`dynamic`, `component`) when the heading is only
//! known at runtime.
//!
//! ## Deterministic Output
//!
//! The directory walk, content listings and final rows are all sorted. Two
//! runs over an unchanged tree produce byte-identical reports, so the CSV
//! can be committed and diffed.

pub mod audit;
pub mod config;
pub mod content;
pub mod heading;
pub mod inventory;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod report;
pub mod scan;
pub mod script;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
