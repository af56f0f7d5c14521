use std::path::PathBuf;

/// A document could not be read from disk.
///
/// The viewer keeps whatever it was showing before; the caller decides how to
/// surface the message.
#[derive(Debug, thiserror::Error)]
#[error("Failed to open file {}: {source}", path.display())]
pub struct DocumentLoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl DocumentLoadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}
