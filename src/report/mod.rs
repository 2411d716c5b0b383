// src/report/mod.rs

use crate::extractors::normalize::NormalizedTable;

/// Width of the longest bar in a chart, in characters.
const BAR_WIDTH: usize = 40;

/// Renders a normalized table as fixed-width aligned text: header row,
/// separator, then one line per record.
pub fn render_table(table: &NormalizedTable) -> String {
    if table.is_empty() {
        return "(no table extracted)".to_string();
    }

    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    let rendered_records: Vec<Vec<String>> = table
        .records
        .iter()
        .map(|record| record.iter().map(|cell| cell.to_string()).collect())
        .collect();

    for record in &rendered_records {
        for (j, cell) in record.iter().enumerate() {
            if j < widths.len() {
                widths[j] = widths[j].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &table.headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);
    for record in &rendered_records {
        push_row(&mut out, record, &widths);
    }

    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell.as_ref(), width = w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Renders a horizontal bar chart: one labeled bar per entry, scaled so the
/// largest magnitude fills `BAR_WIDTH` characters, value printed after the
/// bar.
pub fn render_bar_chart(title: &str, entries: &[(&str, f64)]) -> String {
    let label_width = entries.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let max_magnitude = entries
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    let mut out = format!("{}\n", title);
    for (label, value) in entries {
        let len = if max_magnitude > 0.0 {
            ((value.abs() / max_magnitude) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {:<label_width$}  {}  {}\n",
            label,
            "█".repeat(len),
            value,
            label_width = label_width
        ));
    }

    out
}

/// Formats a ratio as a percentage with two decimals, e.g. 0.15 → "15.00%".
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
