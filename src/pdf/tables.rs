// src/pdf/tables.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// One detected table: a list of rows, each row a list of cell strings.
/// Rows from the same table may be ragged (different cell counts).
pub type RawTable = Vec<Vec<String>>;

// A run of two or more whitespace characters separates cells within a line.
// Single spaces stay inside a cell so multi-word labels survive intact.
static CELL_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("Failed to compile CELL_SPLIT_RE"));

/// Minimum number of consecutive tabular lines that constitute a table.
const MIN_TABLE_ROWS: usize = 2;

/// Detects tables in a page's extracted text.
///
/// The text extractor yields plain lines with column gaps rendered as runs
/// of spaces, so detection is positional: any line that splits into two or
/// more cells on a multi-space gap is a table row, and each maximal run of
/// consecutive table rows becomes one table. Single stray tabular lines are
/// discarded as layout noise.
pub fn detect_tables(text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: RawTable = Vec::new();

    for line in text.lines() {
        match split_cells(line) {
            Some(cells) => current.push(cells),
            None => flush_table(&mut current, &mut tables),
        }
    }
    flush_table(&mut current, &mut tables);

    tables
}

/// Splits a line into cells on multi-space gaps.
/// Returns None for blank lines and lines that don't look tabular.
fn split_cells(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cells: Vec<String> = CELL_SPLIT_RE
        .split(trimmed)
        .map(|c| c.trim().to_string())
        .collect();

    if cells.len() >= 2 {
        Some(cells)
    } else {
        None
    }
}

fn flush_table(current: &mut RawTable, tables: &mut Vec<RawTable>) {
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_simple_table() {
        let text = "\
Consolidated Balance Sheet

Particulars            Note    2024      2023
Total Assets           12      1,00,000  95,000
Total Liabilities      13      40,000    38,000

(All amounts in lakhs)
";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.len(), 3);
        assert_eq!(table[0], vec!["Particulars", "Note", "2024", "2023"]);
        assert_eq!(table[1], vec!["Total Assets", "12", "1,00,000", "95,000"]);
    }

    #[test]
    fn test_single_tabular_line_is_noise() {
        let text = "Heading text\nLeft    Right\nMore prose here";
        assert!(detect_tables(text).is_empty());
    }

    #[test]
    fn test_blank_line_splits_tables() {
        let text = "a  b\nc  d\n\ne  f\ng  h";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[1].len(), 2);
    }

    #[test]
    fn test_ragged_rows_preserved() {
        let text = "Particulars  2024  2023\nEquity  500\n";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][0].len(), 3);
        assert_eq!(tables[0][1].len(), 2);
    }

    #[test]
    fn test_single_spaces_stay_in_cell() {
        let cells = split_cells("Income from Operations    9,500").unwrap();
        assert_eq!(cells, vec!["Income from Operations", "9,500"]);
    }
}
