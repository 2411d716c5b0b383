// src/metrics/mod.rs

use crate::extractors::normalize::{Cell, NormalizedTable};

// Candidate label lists, most preferred first. Revenue and profit lines go
// by several names across Indian annual reports (PAT = Profit After Tax).
pub const ASSET_LABELS: &[&str] = &["Total Assets"];
pub const LIABILITY_LABELS: &[&str] = &["Total Liabilities"];
pub const REVENUE_LABELS: &[&str] = &["Revenue", "Turnover", "Income from Operations"];
pub const PROFIT_LABELS: &[&str] = &["Net Profit", "Profit for the year", "PAT"];

/// Finds the record for the first candidate label that matches.
///
/// Candidates are tried in order; a candidate matches a record when it
/// appears as a case-insensitive substring of the record's first-column
/// value. The first matching record for the first matching candidate wins.
pub fn find_metric_row<'a>(
    table: &'a NormalizedTable,
    candidates: &[&str],
) -> Option<&'a [Cell]> {
    if table.is_empty() {
        return None;
    }

    for candidate in candidates {
        let needle = candidate.to_lowercase();
        let hit = table.records.iter().find(|record| {
            record
                .first()
                .map(|label| label.to_string().to_lowercase().contains(&needle))
                .unwrap_or(false)
        });
        if let Some(record) = hit {
            tracing::debug!("Label {:?} matched record {:?}", candidate, record.first());
            return Some(record.as_slice());
        }
    }

    None
}

/// Reads the metric value out of a matched record: the first numeric cell
/// after the label column, scanning left to right.
pub fn row_value(record: &[Cell]) -> Option<f64> {
    record.iter().skip(1).find_map(Cell::as_number)
}

/// Convenience wrapper: label lookup plus value extraction in one step.
pub fn metric_value(table: &NormalizedTable, candidates: &[&str]) -> Option<f64> {
    find_metric_row(table, candidates).and_then(row_value)
}

/// The four named metrics derived from the two statement extracts. Any of
/// them may fail to resolve; downstream rendering skips what is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementMetrics {
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub revenue: Option<f64>,
    pub net_profit: Option<f64>,
}

impl StatementMetrics {
    pub fn derive(balance_sheet: &NormalizedTable, profit_loss: &NormalizedTable) -> Self {
        Self {
            total_assets: metric_value(balance_sheet, ASSET_LABELS),
            total_liabilities: metric_value(balance_sheet, LIABILITY_LABELS),
            revenue: metric_value(profit_loss, REVENUE_LABELS),
            net_profit: metric_value(profit_loss, PROFIT_LABELS),
        }
    }

    /// Profit margin (profit ÷ revenue) when both sides resolve.
    pub fn profit_margin(&self) -> Option<f64> {
        match (self.net_profit, self.revenue) {
            (Some(profit), Some(revenue)) => Some(profit / revenue),
            _ => None,
        }
    }
}
