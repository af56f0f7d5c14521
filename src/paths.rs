use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "pageturn";

/// `<config dir>/pageturn/config.json`, or `None` when the platform has no
/// config directory.
pub fn resolve_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

/// Log file under the XDG state dir (falling back to the cache dir). The
/// directory is created if needed.
pub fn resolve_log_path() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .context("No state or cache directory available for the log file")?;
    let dir = base.join(APP_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    Ok(dir.join("pageturn.log"))
}
