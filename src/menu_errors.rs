//! # Menu Error Types Module
//!
//! This module defines the error types surfaced by the extraction pipeline.
//! Garbage input is never an error: it degrades to an empty or low-confidence
//! menu. Errors are reserved for broken configuration and misuse of the API.

use thiserror::Error;

/// Errors returned by the menu extraction pipeline
#[derive(Debug, Error)]
pub enum MenuError {
    /// The caller supplied both a text block and element descriptors, or neither
    #[error("Contract violation: {0}")]
    ContractViolation(String),
    /// A configuration value is missing or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A knowledge base entry is malformed
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),
    /// A configuration or knowledge base file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A configuration or knowledge base file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MenuResult<T> = Result<T, MenuError>;
