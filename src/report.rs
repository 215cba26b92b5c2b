//! CSV report.
//!
//! The inventory is written for a spreadsheet import, so the format is fixed
//! and deliberately plain:
//!
//! ```text
//! "route","title","meta_description","canonical","h1","robots","structured_data"
//! "/","prism | websites that work","...","https://www.design-prism.com","...","index","yes"
//! ```
//!
//! Every field is double-quoted with embedded quotes doubled. Lines are
//! joined by `\n` with no trailing newline. Rows are ordered by route so two
//! runs over the same tree produce byte-identical files.

use crate::types::InventoryRow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HEADER: [&str; 7] = [
    "route",
    "title",
    "meta_description",
    "canonical",
    "h1",
    "robots",
    "structured_data",
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: record {record}: expected {expected} fields, found {found}")]
    Shape {
        path: PathBuf,
        record: usize,
        expected: usize,
        found: usize,
    },
}

/// Render rows as CSV text, header first, sorted by route.
pub fn render_csv(rows: &[InventoryRow]) -> String {
    let mut sorted: Vec<&InventoryRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.route.cmp(&b.route));

    let mut lines = Vec::with_capacity(sorted.len() + 1);
    lines.push(format_line(&HEADER));
    for row in sorted {
        lines.push(format_line(&row_fields(row)));
    }
    lines.join("\n")
}

/// Write the report to `path`, creating parent directories. Returns the
/// number of data rows written.
pub fn write_csv(path: &Path, rows: &[InventoryRow]) -> Result<usize, ReportError> {
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, render_csv(rows)).map_err(write_err)?;
    Ok(rows.len())
}

/// Read a report back. The header line is skipped.
pub fn read_csv(path: &Path) -> Result<Vec<InventoryRow>, ReportError> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (idx, record) in split_records(&text).into_iter().enumerate().skip(1) {
        if record.trim().is_empty() {
            continue;
        }
        let fields = parse_line(record);
        let [route, title, meta_description, canonical, h1, robots, structured_data]: [String; 7] =
            fields.try_into().map_err(|fields: Vec<String>| ReportError::Shape {
                path: path.to_path_buf(),
                record: idx + 1,
                expected: HEADER.len(),
                found: fields.len(),
            })?;
        rows.push(InventoryRow {
            route,
            title,
            meta_description,
            canonical,
            h1,
            robots,
            structured_data: structured_data == "yes",
        });
    }
    Ok(rows)
}

/// Split on newlines outside quoted fields.
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                records.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    records.push(&text[start..]);
    records
}

fn row_fields(row: &InventoryRow) -> [&str; 7] {
    [
        row.route.as_str(),
        row.title.as_str(),
        row.meta_description.as_str(),
        row.canonical.as_str(),
        row.h1.as_str(),
        row.robots.as_str(),
        if row.structured_data { "yes" } else { "no" },
    ]
}

fn format_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Split one CSV line into fields.
///
/// Handles quoted fields with doubled quotes and bare fields. A record
/// containing a quoted newline must be passed whole.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(route: &str) -> InventoryRow {
        InventoryRow {
            route: route.to_string(),
            title: format!("{route} title"),
            robots: "index".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn header_only_for_no_rows() {
        assert_eq!(
            render_csv(&[]),
            r#""route","title","meta_description","canonical","h1","robots","structured_data""#
        );
    }

    #[test]
    fn rows_sorted_and_quoted() {
        let mut home = row("/");
        home.structured_data = true;
        let csv = render_csv(&[row("/pricing"), home, row("/about")]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], r#""/","/ title","","","","index","yes""#);
        assert!(lines[2].starts_with(r#""/about","#));
        assert!(lines[3].starts_with(r#""/pricing","#));
        assert!(lines[3].ends_with(r#""no""#));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn sort_is_byte_order() {
        let csv = render_csv(&[row("/b"), row("/B"), row("/a-b"), row("/a")]);
        let routes: Vec<String> = csv
            .split('\n')
            .skip(1)
            .map(|l| parse_line(l)[0].clone())
            .collect();
        assert_eq!(routes, vec!["/B", "/a", "/a-b", "/b"]);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut r = row("/q");
        r.title = r#"say "hi", then leave"#.to_string();
        let csv = render_csv(&[r]);
        let line = csv.split('\n').nth(1).unwrap();
        assert!(line.contains(r#""say ""hi"", then leave""#));
        assert_eq!(parse_line(line)[1], r#"say "hi", then leave"#);
    }

    #[test]
    fn parse_line_bare_and_empty_fields() {
        assert_eq!(parse_line("a,,\"b\""), vec!["a", "", "b"]);
        assert_eq!(parse_line("\"\""), vec![""]);
    }

    #[test]
    fn write_creates_parents_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seo/nested/inventory.csv");

        assert_eq!(write_csv(&path, &[row("/a"), row("/b")]).unwrap(), 2);
        assert_eq!(write_csv(&path, &[row("/c")]).unwrap(), 1);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.split('\n').count(), 2);
        assert!(text.contains("/c"));
        assert!(!text.contains("/a"));
    }

    #[test]
    fn read_back_written_report() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inventory.csv");
        let mut r = row("/x");
        r.h1 = "a \"quoted\" heading".to_string();
        r.meta_description = "two\nlines".to_string();
        r.structured_data = true;
        write_csv(&path, &[r.clone()]).unwrap();

        assert_eq!(read_csv(&path).unwrap(), vec![r]);
    }

    #[test]
    fn read_rejects_short_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inventory.csv");
        fs::write(&path, "header\n\"/\",\"t\"").unwrap();
        assert!(matches!(
            read_csv(&path),
            Err(ReportError::Shape { record: 2, found: 2, .. })
        ));
    }
}
