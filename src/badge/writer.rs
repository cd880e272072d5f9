// src/badge/writer.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::badge::models::Badge;
use crate::utils::error::WriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// shields.io endpoint JSON
    Json,
    /// `label: message`
    Text,
}

/// Writes rendered badges to stdout or to a file.
pub struct BadgeWriter {
    format: OutputFormat,
    target: Option<PathBuf>,
}

impl BadgeWriter {
    pub fn new(format: OutputFormat, target: Option<PathBuf>) -> Self {
        Self { format, target }
    }

    pub fn render(&self, badge: &Badge) -> Result<String, WriteError> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(badge)
                .map_err(|e| WriteError::SerializationError(e.to_string())),
            OutputFormat::Text => Ok(badge.to_text()),
        }
    }

    pub fn write(&self, badge: &Badge) -> Result<(), WriteError> {
        let mut rendered = self.render(badge)?;
        rendered.push('\n');

        match &self.target {
            Some(path) => {
                Self::ensure_parent(path)?;
                fs::write(path, rendered)?;
                tracing::info!("Saved badge to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    fn ensure_parent(path: &Path) -> Result<(), WriteError> {
        // Create the directories if they don't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::models::render_dynamic_badge;

    #[test]
    fn test_render_text() {
        let writer = BadgeWriter::new(OutputFormat::Text, None);
        let badge = render_dynamic_badge("2.4", "version");
        assert_eq!(writer.render(&badge).unwrap(), "version: 2.4");
    }

    #[test]
    fn test_render_json_round_trips() {
        let writer = BadgeWriter::new(OutputFormat::Json, None);
        let badge = render_dynamic_badge("n/a", "match");
        let parsed: Badge = serde_json::from_str(&writer.render(&badge).unwrap()).unwrap();
        assert_eq!(parsed, badge);
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let dir = std::env::temp_dir().join(format!("dynamic-regex-test-{}", std::process::id()));
        let path = dir.join("nested").join("badge.json");
        let writer = BadgeWriter::new(OutputFormat::Json, Some(path.clone()));

        writer.write(&render_dynamic_badge("42", "match")).unwrap();

        let saved: Badge = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.message, "42");
        fs::remove_dir_all(&dir).unwrap();
    }
}
