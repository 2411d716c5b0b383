// src/extractors/normalize.rs

// --- Imports ---
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// --- Constants ---
/// Placeholder name for header cells that come back blank from extraction.
const BLANK_HEADER_NAME: &str = "Column";

/// One cell of a normalized table: either a successfully coerced number or
/// the residual string when coercion fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A cleaned financial-statement table: unique header names plus one record
/// per surviving raw row. An empty table (no headers, no records) is the
/// "statement not found" sentinel that callers check with [`is_empty`].
///
/// [`is_empty`]: NormalizedTable::is_empty
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.records.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Normalizes a flat list of raw rows into a structured table.
///
/// Rows are first padded to a rectangular grid, then columns that are blank
/// in every row and rows that are blank in every column are dropped. The
/// first surviving row is promoted to the header (blank names replaced with
/// a placeholder, duplicates suffixed), remaining rows become records, rows
/// with a blank first cell are discarded, and every record cell goes through
/// numeric coercion.
pub fn normalize(rows: Vec<Vec<String>>) -> NormalizedTable {
    if rows.is_empty() {
        return NormalizedTable::default();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let grid: Vec<Vec<String>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();

    // Columns with at least one non-blank cell survive.
    let kept_columns: Vec<usize> = (0..width)
        .filter(|&j| grid.iter().any(|row| !row[j].trim().is_empty()))
        .collect();

    let mut pruned: Vec<Vec<String>> = grid
        .into_iter()
        .map(|row| {
            kept_columns
                .iter()
                .map(|&j| row[j].clone())
                .collect::<Vec<String>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    if pruned.is_empty() {
        return NormalizedTable::default();
    }

    // Header row cleanup
    let header_row = pruned.remove(0);
    let headers = dedupe_headers(
        header_row
            .iter()
            .map(|h| {
                let trimmed = h.trim();
                if trimmed.is_empty() {
                    BLANK_HEADER_NAME.to_string()
                } else {
                    trimmed.to_string()
                }
            })
            .collect(),
    );

    let records: Vec<Vec<Cell>> = pruned
        .into_iter()
        .filter(|row| !row[0].trim().is_empty())
        .map(|row| row.iter().map(|cell| coerce_numeric(cell)).collect())
        .collect();

    tracing::debug!(
        "Normalized table: {} columns, {} records",
        headers.len(),
        records.len()
    );

    NormalizedTable { headers, records }
}

/// Deduplicates header names: the first occurrence keeps its name, each
/// repeat gets a numeric suffix (`Revenue`, `Revenue_1`, `Revenue_2`).
fn dedupe_headers(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut deduped = Vec::with_capacity(columns.len());

    for column in columns {
        match seen.get_mut(&column) {
            None => {
                seen.insert(column.clone(), 0);
                deduped.push(column);
            }
            Some(count) => {
                *count += 1;
                deduped.push(format!("{}_{}", column, count));
            }
        }
    }

    deduped
}

/// Best-effort numeric coercion for a raw cell value.
///
/// Strips thousands-separator commas, converts the accounting negative
/// `(500)` to `-500`, and trims whitespace. A value that still fails to
/// parse as a float is kept as the original string, unchanged.
pub fn coerce_numeric(raw: &str) -> Cell {
    let mut candidate = raw.trim().replace(',', "");

    if candidate.len() >= 2 && candidate.starts_with('(') && candidate.ends_with(')') {
        candidate = format!("-{}", &candidate[1..candidate.len() - 1]);
    }

    match candidate.trim().parse::<f64>() {
        Ok(value) => Cell::Number(value),
        Err(_) => Cell::Text(raw.to_string()),
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_rows_give_empty_table() {
        let table = normalize(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.record_count(), 0);
    }

    #[test]
    fn test_all_blank_rows_give_empty_table() {
        let table = normalize(rows(&[&["", "  "], &["", ""]]));
        assert!(table.is_empty());
    }

    #[test]
    fn test_header_dedup() {
        assert_eq!(
            dedupe_headers(vec![
                "A".to_string(),
                "B".to_string(),
                "A".to_string(),
                "A".to_string()
            ]),
            vec!["A", "B", "A_1", "A_2"]
        );
    }

    #[test]
    fn test_blank_header_cell_gets_placeholder() {
        let table = normalize(rows(&[
            &["Particulars", "  ", "2023"],
            &["Total Assets", "12", "95,000"],
        ]));
        assert_eq!(table.headers, vec!["Particulars", "Column", "2023"]);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_numeric("1,234"), Cell::Number(1234.0));
        assert_eq!(coerce_numeric("(500)"), Cell::Number(-500.0));
        assert_eq!(coerce_numeric("(1,234)"), Cell::Number(-1234.0));
        assert_eq!(coerce_numeric("N/A"), Cell::Text("N/A".to_string()));
        assert_eq!(coerce_numeric(" 42.5 "), Cell::Number(42.5));
        // Indian-style lakh grouping
        assert_eq!(coerce_numeric("1,00,000"), Cell::Number(100_000.0));
    }

    #[test]
    fn test_coercion_failure_keeps_original_string() {
        // Not the stripped intermediate ("ab" here), the raw input.
        assert_eq!(coerce_numeric("a,b"), Cell::Text("a,b".to_string()));
    }

    #[test]
    fn test_blank_first_cell_records_excluded() {
        let table = normalize(rows(&[
            &["Particulars", "2024"],
            &["Revenue", "9,500"],
            &["", "123"],
            &["Net Profit", "1,200"],
        ]));
        assert_eq!(table.record_count(), 2);
        assert_eq!(table.records[0][0], Cell::Text("Revenue".to_string()));
        assert_eq!(table.records[1][0], Cell::Text("Net Profit".to_string()));
    }

    #[test]
    fn test_blank_column_dropped() {
        let table = normalize(rows(&[
            &["Particulars", "", "2024"],
            &["Revenue", "", "9,500"],
        ]));
        assert_eq!(table.headers, vec!["Particulars", "2024"]);
        assert_eq!(table.records[0].len(), 2);
    }

    #[test]
    fn test_ragged_rows_padded_to_header_width() {
        let table = normalize(rows(&[
            &["Particulars", "2024", "2023"],
            &["Equity", "500"],
        ]));
        assert_eq!(table.records[0].len(), 3);
        assert!(table.records[0][2].is_blank());
    }

    #[test]
    fn test_record_cells_coerced() {
        let table = normalize(rows(&[
            &["Particulars", "2024"],
            &["Total Assets", "1,00,000"],
            &["Contingent items", "see note 4"],
        ]));
        assert_eq!(table.records[0][1], Cell::Number(100_000.0));
        assert_eq!(
            table.records[1][1],
            Cell::Text("see note 4".to_string())
        );
    }

    #[test]
    fn test_serializes_numbers_and_text_untagged() {
        let table = normalize(rows(&[&["A", "B"], &["x", "1,234"]]));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["records"][0][0], serde_json::json!("x"));
        assert_eq!(json["records"][0][1], serde_json::json!(1234.0));
    }
}
