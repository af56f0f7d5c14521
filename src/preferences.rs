use crate::navigation::AdvancePolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_RECENT_FILES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: PathBuf,
    pub last_opened: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    recent_files: Vec<RecentFile>,
    #[serde(default = "default_last_directory")]
    last_directory: PathBuf,
    #[serde(default = "default_theme")]
    theme: String,
    #[serde(default)]
    advance_policy: AdvancePolicy,
    #[serde(default = "default_true")]
    word_wrap: bool,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

/// Older config files were a bare list of recently opened paths.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPreferences {
    Legacy(Vec<PathBuf>),
    Current(Preferences),
}

fn default_last_directory() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_theme() -> String {
    "Default".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            last_directory: default_last_directory(),
            theme: default_theme(),
            advance_policy: AdvancePolicy::default(),
            word_wrap: true,
            file_path: None,
        }
    }
}

impl Preferences {
    /// Preferences that live only for this session and are never written.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    pub fn with_file(file_path: &Path) -> Self {
        Self {
            file_path: Some(file_path.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn load_or_ephemeral(file_path: Option<&Path>) -> Self {
        match file_path {
            Some(path) => Self::load_from_file(path).unwrap_or_else(|e| {
                log::error!("Failed to load preferences from {}: {}", path.display(), e);
                Self::with_file(path)
            }),
            None => Self::ephemeral(),
        }
    }

    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        if !file_path.exists() {
            return Ok(Self::with_file(file_path));
        }

        let content = fs::read_to_string(file_path)?;
        let mut preferences = match serde_json::from_str::<StoredPreferences>(&content)? {
            StoredPreferences::Current(preferences) => preferences,
            StoredPreferences::Legacy(paths) => {
                log::info!("Converting legacy recent-files list from {}", file_path.display());
                let now = Utc::now();
                Self {
                    recent_files: paths
                        .into_iter()
                        .map(|path| RecentFile {
                            path,
                            last_opened: now,
                        })
                        .collect(),
                    ..Self::default()
                }
            }
        };

        let before = preferences.recent_files.len();
        preferences.recent_files.retain(|entry| entry.path.exists());
        preferences.recent_files.truncate(MAX_RECENT_FILES);
        if preferences.recent_files.len() != before {
            log::debug!(
                "Dropped {} recent files that no longer exist",
                before - preferences.recent_files.len()
            );
        }

        preferences.file_path = Some(file_path.to_path_buf());
        Ok(preferences)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        match &self.file_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                }
                let content = serde_json::to_string_pretty(self)?;
                fs::write(path, content)?;
                Ok(())
            }
            None => {
                // Ephemeral preferences don't save to disk
                Ok(())
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save preferences: {}", e);
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn recent_files(&self) -> &[RecentFile] {
        &self.recent_files
    }

    /// Most recently opened file that still exists on disk.
    pub fn most_recent_existing(&self) -> Option<&Path> {
        self.recent_files
            .iter()
            .map(|entry| entry.path.as_path())
            .find(|path| path.exists())
    }

    /// Move `path` to the top of the recent list and remember its directory.
    pub fn add_recent_file(&mut self, path: &Path) {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        self.recent_files.retain(|entry| entry.path != path);
        if let Some(parent) = path.parent() {
            self.last_directory = parent.to_path_buf();
        }
        self.recent_files.insert(
            0,
            RecentFile {
                path,
                last_opened: Utc::now(),
            },
        );
        self.recent_files.truncate(MAX_RECENT_FILES);
        self.persist();
    }

    pub fn remove_recent_file(&mut self, path: &Path) -> bool {
        let before = self.recent_files.len();
        self.recent_files.retain(|entry| entry.path != path);
        let removed = self.recent_files.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear_recent(&mut self) {
        self.recent_files.clear();
        self.persist();
    }

    pub fn last_directory(&self) -> &Path {
        &self.last_directory
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
        self.persist();
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.advance_policy
    }

    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.advance_policy = policy;
        self.persist();
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.word_wrap = enabled;
        self.persist();
    }
}
