use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Directory holding every huepick file (`~/.config/huepick` on most platforms).
pub fn huepick_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("huepick")
}

/// Resolve a file path from an override environment variable, falling back to
/// `file_name` inside the huepick config directory.
pub fn resolve_config_file(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    huepick_config_dir().join(file_name)
}
