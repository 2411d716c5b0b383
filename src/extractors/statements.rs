// src/extractors/statements.rs

// --- Imports ---
use crate::extractors::normalize::{normalize, NormalizedTable};
use crate::pdf::PageContent;

// --- Constants ---
// Marker strings locating each statement's page range. Matching is exact,
// case-sensitive substring search against the page's extracted text.
pub const BALANCE_SHEET_MARKER: &str = "Consolidated Balance Sheet";
pub const PROFIT_LOSS_MARKER: &str = "Consolidated Statement of Profit and Loss";

/// Number of consecutive pages collected from each marker hit. Financial
/// statements in this report layout spill onto the following pages, so the
/// marker page plus the next two are taken together.
const PAGES_PER_MARKER: usize = 3;

/// Both statement extracts from one document, normalized.
#[derive(Debug, Default)]
pub struct StatementTables {
    pub balance_sheet: NormalizedTable,
    pub profit_loss: NormalizedTable,
}

/// Runs the full tagger → stitcher → normalizer pipeline over a document's
/// pages.
pub fn extract_statements(pages: &[PageContent]) -> StatementTables {
    let balance_indices = collect_statement_pages(pages, BALANCE_SHEET_MARKER);
    let pl_indices = collect_statement_pages(pages, PROFIT_LOSS_MARKER);

    tracing::info!(
        "Tagged {} balance-sheet pages and {} P&L pages out of {}",
        balance_indices.len(),
        pl_indices.len(),
        pages.len()
    );

    StatementTables {
        balance_sheet: normalize(stitch_rows(pages, &balance_indices)),
        profit_loss: normalize(stitch_rows(pages, &pl_indices)),
    }
}

/// Page Tagger: collects the page group for one statement.
///
/// Every page whose text contains `marker` contributes itself and the next
/// two pages (clamped at the end of the document). Windows from repeated
/// marker hits are concatenated as-is, so overlapping hits accumulate the
/// shared pages more than once and their rows get stitched twice. That
/// duplication is inherited upstream behavior, kept deliberately; see
/// DESIGN.md before changing the matching policy.
pub fn collect_statement_pages(pages: &[PageContent], marker: &str) -> Vec<usize> {
    let mut indices = Vec::new();

    for (i, page) in pages.iter().enumerate() {
        if page.text.contains(marker) {
            tracing::debug!("Marker {:?} found on page {}", marker, i + 1);
            let end = (i + PAGES_PER_MARKER).min(pages.len());
            indices.extend(i..end);
        }
    }

    indices
}

/// Table Stitcher: flattens every detected table's rows across the page
/// group into one row list, preserving page order then table order, with no
/// deduplication.
pub fn stitch_rows(pages: &[PageContent], indices: &[usize]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for &i in indices {
        for table in &pages[i].tables {
            rows.extend(table.iter().cloned());
        }
    }

    rows
}
