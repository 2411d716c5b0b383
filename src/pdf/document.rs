// src/pdf/document.rs

use std::fs;
use std::path::Path;

use crate::pdf::tables::{detect_tables, RawTable};
use crate::utils::error::PdfError;

/// One page of the source report: its extracted text plus the raw tables
/// detected in that text.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub text: String,
    pub tables: Vec<RawTable>,
}

impl PageContent {
    pub fn from_text(text: String) -> Self {
        let tables = detect_tables(&text);
        Self { text, tables }
    }
}

/// An annual-report PDF, loaded page by page.
#[derive(Debug, Default)]
pub struct ReportDocument {
    pages: Vec<PageContent>,
}

impl ReportDocument {
    /// Opens a PDF file and extracts per-page text.
    ///
    /// pdf-extract's error type is flattened to a string; a password-protected
    /// or malformed file surfaces here as `PdfError::Extract`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        let path = path.as_ref();
        tracing::info!("Loading PDF: {}", path.display());

        let bytes = fs::read(path)?;
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| PdfError::Extract(e.to_string()))?;

        tracing::debug!(
            "Extracted text from {} pages ({} bytes on disk)",
            page_texts.len(),
            bytes.len()
        );

        Ok(Self::from_page_texts(page_texts))
    }

    /// Builds a document from already-extracted page texts. Split out from
    /// `open` so tests can construct documents without a PDF fixture.
    pub fn from_page_texts(page_texts: Vec<String>) -> Self {
        let pages = page_texts.into_iter().map(PageContent::from_text).collect();
        Self { pages }
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
