// src/utils/page_debug.rs
use std::fs;
use std::path::Path;

use crate::pdf::PageContent;
use crate::utils::error::AppError;

/// Dumps the extracted text of every page to `<debug_dir>/page_NNN.txt`.
/// Each dump starts with a header line listing which of the given marker
/// strings hit on that page, so marker misses can be diagnosed without
/// re-running extraction.
pub fn dump_page_text(
    pages: &[PageContent],
    debug_dir: &Path,
    markers: &[(&str, &str)],
) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    for (i, page) in pages.iter().enumerate() {
        let hits: Vec<&str> = markers
            .iter()
            .filter(|(marker, _)| page.text.contains(marker))
            .map(|(_, name)| *name)
            .collect();

        let header = if hits.is_empty() {
            "markers: none".to_string()
        } else {
            format!("markers: {}", hits.join(", "))
        };

        let path = debug_dir.join(format!("page_{:03}.txt", i + 1));
        let body = format!(
            "# page {} | {} | tables detected: {}\n\n{}",
            i + 1,
            header,
            page.tables.len(),
            page.text
        );
        fs::write(&path, body)?;
    }

    tracing::info!(
        "Dumped {} page text files to {}",
        pages.len(),
        debug_dir.display()
    );
    Ok(())
}
