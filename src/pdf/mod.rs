// src/pdf/mod.rs
pub mod document;
pub mod tables;

// Re-export key types for convenience
pub use document::{PageContent, ReportDocument};
#[allow(unused_imports)]
pub use tables::RawTable;
