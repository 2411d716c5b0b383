// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::normalize::NormalizedTable;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a normalized statement table as pretty-printed JSON, e.g.
    /// `balance_sheet.json`.
    pub fn save_table(
        &self,
        statement_name: &str,
        table: &NormalizedTable,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.json", statement_name));

        let json = serde_json::to_string_pretty(table)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} table to {}", statement_name, file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about an extracted table in JSON format
    pub fn save_table_metadata(
        &self,
        statement_name: &str,
        source_file: &Path,
        table: &NormalizedTable,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", statement_name));

        let metadata = serde_json::json!({
            "statement": statement_name,
            "source_file": source_file.display().to_string(),
            "columns": table.column_count(),
            "records": table.record_count(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
