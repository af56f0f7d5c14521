use crate::error::DocumentLoadError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded text document.
///
/// Logical lines are derived once on construction and never change; a new
/// file replaces the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    raw_content: String,
    logical_lines: Vec<String>,
}

impl Document {
    pub fn from_text(content: impl Into<String>) -> Self {
        let raw_content = content.into();
        let logical_lines = split_lines(&raw_content);
        Self {
            path: None,
            raw_content,
            logical_lines,
        }
    }

    /// Read a file, replacing invalid UTF-8 sequences instead of failing.
    pub fn load(path: &Path) -> Result<Self, DocumentLoadError> {
        let bytes = fs::read(path).map_err(|e| DocumentLoadError::new(path, e))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let mut document = Self::from_text(content);
        document.path = Some(path.to_path_buf());
        info!(
            "Loaded {} ({} lines)",
            path.display(),
            document.logical_lines.len()
        );
        Ok(document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for window titles and status lines.
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn logical_lines(&self) -> &[String] {
        &self.logical_lines
    }

    pub fn line_count(&self) -> usize {
        self.logical_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logical_lines.is_empty()
    }
}

/// Split content into logical lines on `\n`, dropping a trailing `\r` from
/// each line. Empty content has no lines and a final newline does not start
/// an extra empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
