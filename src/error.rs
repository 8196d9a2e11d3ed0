//! Errors raised while loading or building an instance.
//!
//! The optimization core never fails on a validated [`Instance`](crate::models::Instance);
//! every fallible path lives at the loading boundary.

use std::path::PathBuf;

use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors that can occur while reading, parsing, or assembling an instance.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    /// The instance path does not resolve to a file.
    #[error("instance file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// Reading the file failed for another reason.
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON or does not match the instance schema.
    #[error("invalid instance json: {0}")]
    Json(#[from] serde_json::Error),
    /// Fields are present but have the wrong shape or values.
    #[error("malformed instance: {}", join_messages(.0))]
    Malformed(Vec<ValidationError>),
    /// The instance is well-formed but cannot be optimized (no machines).
    #[error("degenerate instance: {0}")]
    Degenerate(String),
}

impl From<Vec<ValidationError>> for InstanceError {
    /// Zero machines is reported as degenerate; everything else as malformed.
    fn from(errors: Vec<ValidationError>) -> Self {
        if errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoMachines)
        {
            InstanceError::Degenerate("at least one machine is required".into())
        } else {
            InstanceError::Malformed(errors)
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
