//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **route-centric, not file-centric**. Every entry leads with its
//! positional index and route; the fields behind it are indented context
//! lines. The CSV stays the machine-readable artifact, this is the view a
//! person reads in the terminal.
//!
//! # Output Format
//!
//! ## Inventory
//!
//! ```text
//! Routes
//! 001 /
//!     Title: prism | websites, ads and content that grow local businesses
//!     H1: growth for local businesses
//!     Robots: (none)
//! 002 /about
//!     Title: about prism | websites for growing businesses
//!     H1: we build websites that work
//!     Robots: index
//!     Structured data
//!
//! Wrote 10 rows → seo/inventory.csv
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 /contact
//!     title: too_short
//!     title: suffix_not_once
//!     description: missing
//! 002 /thank-you (utility_noindex)
//!     description: missing
//!
//! Checked 10 routes: 2 with issues, 1 noindex
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::audit::{Indexability, RowAudit};
use crate::types::InventoryRow;
use std::path::Path;

const NONE: &str = "(none)";

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Labelled context line, with empty values shown as `(none)`.
fn field_line(label: &str, value: &str) -> String {
    let value = value.trim();
    let shown = if value.is_empty() {
        NONE.to_string()
    } else {
        truncate(&value.replace('\n', " "), 80)
    };
    format!("{}{}: {}", indent(1), label, shown)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

// ============================================================================
// inventory
// ============================================================================

/// Format the rows just written, followed by the report location.
pub fn format_inventory_output(rows: &[InventoryRow], output: &Path) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];

    for (i, row) in rows.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), row.route));
        lines.push(field_line("Title", &row.title));
        lines.push(field_line("H1", &row.h1));
        lines.push(field_line("Robots", &row.robots));
        if row.structured_data {
            lines.push(format!("{}Structured data", indent(1)));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Wrote {} → {}",
        plural(rows.len(), "row", "rows"),
        output.display()
    ));
    lines
}

pub fn print_inventory_output(rows: &[InventoryRow], output: &Path) {
    for line in format_inventory_output(rows, output) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format audit results. Clean, indexable routes are omitted.
pub fn format_check_output(audits: &[RowAudit]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut shown = 0;

    for audit in audits {
        let noindex = audit.indexability == Indexability::UtilityNoindex;
        if audit.is_clean() && !noindex {
            continue;
        }
        shown += 1;

        let header = format!("{} {}", format_index(shown), audit.route);
        if noindex {
            lines.push(format!("{} ({})", header, audit.indexability));
        } else {
            lines.push(header);
        }
        if let Some(issue) = audit.title {
            lines.push(format!("{}title: {}", indent(1), issue));
        }
        if audit.suffix_not_once {
            lines.push(format!("{}title: suffix_not_once", indent(1)));
        }
        if let Some(issue) = audit.description {
            lines.push(format!("{}description: {}", indent(1), issue));
        }
    }

    let with_issues = audits.iter().filter(|a| !a.is_clean()).count();
    let noindex = audits
        .iter()
        .filter(|a| a.indexability == Indexability::UtilityNoindex)
        .count();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {} with issues, {} noindex",
        plural(audits.len(), "route", "routes"),
        with_issues,
        noindex
    ));
    lines
}

pub fn print_check_output(audits: &[RowAudit]) {
    for line in format_check_output(audits) {
        println!("{}", line);
    }
}
