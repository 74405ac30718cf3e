//! Grader-uploaded roster spreadsheet reader (spec §4.B).
//!
//! Mirrors `app/crud/excel_operation.py` from the original implementation:
//! locate the header row beginning with `# 内部コースID`, read columns by
//! name rather than position, and stop at the `#end` sentinel row.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

const HEADER_MARKER: &str = "# 内部コースID";
const END_MARKER: &str = "#end";

// The marker row's `# ` prefix is carried by every header cell on that
// row, not just `HEADER_MARKER` itself.
const COL_STUDENT_ID: &str = "# 学籍番号";
const COL_ROLE: &str = "# ロール";
const COL_SUBMITTED: &str = "# 提出";
const COL_SUBMIT_DATE: &str = "# 提出日時";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub student_id: String,
    pub role: String,
    pub submitted: String,
    pub submit_date: Option<String>,
}

/// Read and restrict a roster spreadsheet. Returns `None` if the file does
/// not exist. A malformed sheet (missing marker row, missing columns)
/// surfaces as `Some(vec![])` rather than an error, per spec.
pub fn parse_roster(path: &Path) -> Option<Vec<RosterRow>> {
    if !path.exists() {
        return None;
    }

    let rows = read_rows(path).unwrap_or_default();
    Some(extract_table(&rows))
}

/// Reads every row of the first sheet as plain strings, with no marker/
/// header handling. Shared by any caller that parses its own spreadsheet
/// convention on top (e.g. a generic header-row table).
pub fn read_sheet_rows(path: &Path) -> Option<Vec<Vec<String>>> {
    read_rows(path)
}

fn read_rows(path: &Path) -> Option<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).ok()?;
    let sheet_name = workbook.sheet_names().first()?.clone();
    let range = workbook.worksheet_range(&sheet_name).ok()?;

    Some(
        range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect(),
    )
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn extract_table(rows: &[Vec<String>]) -> Vec<RosterRow> {
    let header_idx = match rows.iter().position(|r| r.first().map(String::as_str) == Some(HEADER_MARKER)) {
        Some(i) => i,
        None => return Vec::new(),
    };
    let header = &rows[header_idx];

    let col = |name: &str| header.iter().position(|c| c == name);
    let (Some(id_col), Some(role_col), Some(sub_col), Some(date_col)) =
        (col(COL_STUDENT_ID), col(COL_ROLE), col(COL_SUBMITTED), col(COL_SUBMIT_DATE))
    else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for row in rows.iter().skip(header_idx + 1) {
        if row.first().map(String::as_str) == Some(END_MARKER) {
            break;
        }
        let get = |idx: usize| row.get(idx).cloned().unwrap_or_default();
        let student_id = get(id_col);
        if student_id.is_empty() {
            continue;
        }
        let submit_date = get(date_col);
        out.push(RosterRow {
            student_id,
            role: get(role_col),
            submitted: get(sub_col),
            submit_date: if submit_date.is_empty() { None } else { Some(submit_date) },
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn extracts_rows_between_marker_and_end() {
        let rows = rows(&[
            &["noise"],
            &[HEADER_MARKER, "# 学籍番号", "# ロール", "# 提出", "# 提出日時"],
            &["1", "100000001", "履修生", "submitted", "2026-07-01 10:00"],
            &["2", "100000002", "履修生", "non-submitted", ""],
            &["#end"],
            &["3", "100000003", "履修生", "submitted", "2026-07-01 10:05"],
        ]);
        let table = extract_table(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].student_id, "100000001");
        assert_eq!(table[0].submit_date.as_deref(), Some("2026-07-01 10:00"));
        assert_eq!(table[1].submit_date, None);
    }

    /// Mirrors the real header row produced by the grader export, where
    /// every kept column carries the `# ` marker prefix, not just
    /// `HEADER_MARKER`.
    #[test]
    fn extracts_rows_with_real_prefixed_header() {
        let rows = rows(&[
            &[HEADER_MARKER, "# 学籍番号", "# ロール", "# 提出", "# 提出日時"],
            &["1", "100000001", "履修生", "submitted", "2026-07-01 10:00"],
            &["#end"],
        ]);
        let table = extract_table(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].student_id, "100000001");
    }

    #[test]
    fn missing_marker_row_is_empty_table() {
        let rows = rows(&[&["a", "b"], &["c", "d"]]);
        assert!(extract_table(&rows).is_empty());
    }

    #[test]
    fn missing_required_column_is_empty_table() {
        let rows = rows(&[&[HEADER_MARKER, "# 学籍番号", "# ロール"]]);
        assert!(extract_table(&rows).is_empty());
    }

    #[test]
    fn nonexistent_file_is_none() {
        assert_eq!(parse_roster(Path::new("/nonexistent/reportlist.xlsx")), None);
    }
}
