// src/badge/models.rs
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, FetchError, PipelineError};

pub const DEFAULT_LABEL: &str = "match";

/// Badge in the shields.io "endpoint" JSON shape.
/// Example: {"schemaVersion":1,"label":"match","message":"2.4","color":"blue"}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: String,
}

impl Badge {
    pub fn new(label: &str, message: impl Into<String>, color: &str) -> Self {
        Self {
            schema_version: 1,
            label: label.to_string(),
            message: message.into(),
            color: color.to_string(),
        }
    }

    /// Plain `label: message` rendering
    pub fn to_text(&self) -> String {
        format!("{}: {}", self.label, self.message)
    }
}

/// Badge showing an extracted value.
pub fn render_dynamic_badge(value: &str, label: &str) -> Badge {
    Badge::new(label, value, "blue")
}

/// Badge describing a user-facing failure, or `None` when the error is not
/// something a badge can explain (local I/O, bad configuration).
pub fn render_error_badge(error: &AppError, label: &str) -> Option<Badge> {
    let badge = match error {
        AppError::Extraction(PipelineError::InvalidRegex { cause }) => {
            Badge::new(label, format!("invalid regex: {}", cause), "lightgrey")
        }
        AppError::Fetch(FetchError::NotFound(_)) => Badge::new(label, "resource not found", "red"),
        AppError::Fetch(FetchError::InvalidUrl { .. }) => Badge::new(label, "invalid url", "lightgrey"),
        AppError::Fetch(FetchError::TooLarge { .. }) => {
            Badge::new(label, "maximum response size exceeded", "lightgrey")
        }
        AppError::Fetch(_) => Badge::new(label, "inaccessible", "lightgrey"),
        AppError::Config(_) | AppError::Write(_) => return None,
    };
    Some(badge)
}
