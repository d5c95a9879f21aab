//! Error types for the scoring engine and its hit sources.
//!
//! Gameplay outcomes (bust, round complete, game won) are never errors; they
//! are reported as [`EngineEvent`](crate::EngineEvent)s. The variants below
//! cover contract violations by a collaborator and hit-source failures.
//!
//! ## Error Categories
//!
//! - **Contract Errors**: invalid start score, config or segment handed to the engine
//! - **Source Errors**: a hit source that failed while producing hits
//! - **File Errors**: recordings or config files that cannot be read
//! - **Parse Errors**: malformed payloads, recordings or config documents
//!
//! ```rust
//! use oche::ScoringError;
//!
//! let error = ScoringError::source_failed("board went quiet");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SegmentCategory;

/// Result type alias for scoring operations.
pub type Result<T, E = ScoringError> = std::result::Result<T, E>;

/// Main error type for scoring operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("Start score must be greater than 1, got {start_score}")]
    InvalidStartScore { start_score: u32 },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Invalid segment: {details}")]
    InvalidSegment { details: String },

    #[error("Segments of category {category:?} cannot be classified")]
    NotClassifiable { category: SegmentCategory },

    #[error("Hit source failed: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },
}

impl ScoringError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScoringError::Source { .. } => true,
            ScoringError::InvalidStartScore { .. } => false,
            ScoringError::InvalidConfig { .. } => false,
            ScoringError::InvalidSegment { .. } => false,
            ScoringError::NotClassifiable { .. } => false,
            ScoringError::File { .. } => false,
            ScoringError::Parse { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ScoringError::InvalidStartScore { .. } => {
                vec!["Start the game from a score of 2 or more", "Use 301 or 501 for standard play"]
            }
            ScoringError::InvalidConfig { .. } => vec![
                "Check the configuration file against the documented defaults",
                "Remove the field to fall back to its default",
            ],
            ScoringError::InvalidSegment { .. } => vec![
                "Use sector numbers between 1 and 20",
                "Build segments through SegmentId::segment",
            ],
            ScoringError::NotClassifiable { .. } => vec![
                "Route reset-button segments through RoundEngine::process_hit",
                "Only classify scoring segments",
            ],
            ScoringError::Source { .. } => vec![
                "Check the board is powered and in range",
                "Re-attach the hit source",
                "Try replaying a recorded session to isolate the board",
            ],
            ScoringError::File { .. } => vec![
                "Check the file exists and is readable",
                "Check file permissions",
            ],
            ScoringError::Parse { .. } => vec![
                "Check the input uses dash-separated decimal bytes",
                "Verify the document is valid YAML",
            ],
        }
    }

    /// Helper constructor for hit-source failures.
    pub fn source_failed(reason: impl Into<String>) -> Self {
        ScoringError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for hit-source failures with source.
    pub fn source_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        ScoringError::Source { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ScoringError::File { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoringError::InvalidConfig { field: field.into(), reason: reason.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        ScoringError::Parse { context: context.into(), details: details.into() }
    }
}

impl From<std::io::Error> for ScoringError {
    fn from(err: std::io::Error) -> Self {
        ScoringError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
