//! Quality flags for report rows.
//!
//! Flags are advisory. They are printed by `seo-inventory check` and never
//! change the CSV.

use crate::config::AuditConfig;
use crate::types::InventoryRow;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthIssue {
    Missing,
    TooShort,
    TooLong,
}

impl fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthIssue::Missing => write!(f, "missing"),
            LengthIssue::TooShort => write!(f, "too_short"),
            LengthIssue::TooLong => write!(f, "too_long"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indexability {
    Indexable,
    UtilityNoindex,
}

impl fmt::Display for Indexability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indexability::Indexable => write!(f, "indexable"),
            Indexability::UtilityNoindex => write!(f, "utility_noindex"),
        }
    }
}

/// Audit result for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAudit {
    pub route: String,
    pub title: Option<LengthIssue>,
    /// Indexable title without exactly one brand suffix.
    pub suffix_not_once: bool,
    pub description: Option<LengthIssue>,
    pub indexability: Indexability,
}

impl RowAudit {
    pub fn is_clean(&self) -> bool {
        self.title.is_none() && !self.suffix_not_once && self.description.is_none()
    }
}

/// Length check in characters, after trimming.
pub fn length_issue(text: &str, min: usize, max: usize) -> Option<LengthIssue> {
    let len = text.trim().chars().count();
    if len == 0 {
        Some(LengthIssue::Missing)
    } else if len < min {
        Some(LengthIssue::TooShort)
    } else if len > max {
        Some(LengthIssue::TooLong)
    } else {
        None
    }
}

/// Any robots directive list naming `noindex`, e.g. `"noindex, nofollow"`.
pub fn indexability(robots: &str) -> Indexability {
    if robots.to_ascii_lowercase().contains("noindex") {
        Indexability::UtilityNoindex
    } else {
        Indexability::Indexable
    }
}

/// Occurrences of the brand suffix in `title`, ignoring case and the
/// suffix's surrounding whitespace. Zero for an all-whitespace suffix.
pub fn count_brand_suffixes(title: &str, brand_suffix: &str) -> usize {
    let needle = brand_suffix.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    title.to_lowercase().matches(needle.as_str()).count()
}

pub fn audit_row(row: &InventoryRow, thresholds: &AuditConfig, brand_suffix: &str) -> RowAudit {
    let indexability = indexability(&row.robots);
    RowAudit {
        route: row.route.clone(),
        title: length_issue(&row.title, thresholds.title_min, thresholds.title_max),
        suffix_not_once: indexability == Indexability::Indexable
            && count_brand_suffixes(&row.title, brand_suffix) != 1,
        description: length_issue(
            &row.meta_description,
            thresholds.description_min,
            thresholds.description_max,
        ),
        indexability,
    }
}

pub fn audit_rows(
    rows: &[InventoryRow],
    thresholds: &AuditConfig,
    brand_suffix: &str,
) -> Vec<RowAudit> {
    rows.iter()
        .map(|r| audit_row(r, thresholds, brand_suffix))
        .collect()
}
