//! Error types for folio operations.
//!
//! Building and reading content never fails. Errors only come from the
//! pluggable pieces: an injected HTML extractor, or decoding an outline.

use thiserror::Error;

/// Errors that can occur while populating content.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTML extraction failed: {0}")]
    Extraction(String),

    #[cfg(feature = "serde")]
    #[error("Invalid section outline: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
