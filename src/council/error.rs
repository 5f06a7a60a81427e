use crate::model::RecordId;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field that failed validation, with a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Raised by the form controller when a draft cannot be committed.
///
/// Carries every offending field so the presentation layer can mark all of
/// them inline at once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.push(field, message);
        err
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// True if the named field has at least one issue.
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{notice}")]
    ProtectionViolation {
        collection: String,
        id: RecordId,
        notice: String,
    },

    #[error("Record not found in {collection}: {id}")]
    NotFound { collection: String, id: RecordId },

    #[error("Cannot change status of {id} from {from} to {to}")]
    InvalidTransition {
        id: RecordId,
        from: String,
        to: String,
    },

    #[error("Please log in to access the admin panel")]
    Unauthenticated,

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CouncilError>;
