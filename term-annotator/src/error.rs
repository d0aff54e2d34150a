//! Error types for dictionary loading and matcher construction
//!
//! Annotation itself never fails: `enrich` degrades to "no annotation" instead.
//! These errors only surface while a dictionary is loaded or an engine is configured.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermError {
    /// The dictionary file could not be read
    #[error("failed to read dictionary '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The dictionary is not valid JSON
    #[error("failed to parse dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The dictionary root is not a JSON object
    #[error("dictionary root must be a JSON object")]
    NotAnObject,
    /// A dictionary key is the empty string
    #[error("dictionary contains an empty source term")]
    EmptyTerm,
    /// A dictionary value is neither a string nor an array of strings
    #[error("target for '{term}' must be a string or an array of strings")]
    InvalidTarget { term: String },
    /// The target locale tag could not be parsed
    #[error("invalid locale '{0}'")]
    Locale(String),
    /// A term matcher was rejected by the regex engine
    #[error("failed to compile term matcher: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for dictionary and engine configuration operations
pub type TermResult<T> = Result<T, TermError>;
