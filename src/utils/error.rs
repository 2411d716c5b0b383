// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("I/O error reading PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF text extraction failed: {0}")]
    Extract(String), // pdf-extract's error type, flattened to a string
}

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error from completion API: {0}")]
    Http(reqwest::StatusCode), // e.g., 401 Unauthorized, 429 Too Many Requests

    #[error("Failed to parse completion response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("PDF handling failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("AI processing failed: {0}")]
    Ai(#[from] AiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
