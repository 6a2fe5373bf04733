use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use huepick_catalog::load_catalog;
use huepick_util::{AppConfig, UserPreferences, huepick_config_dir};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "huepick.log";

#[derive(Parser, Debug)]
#[command(name = "huepick", version, about = "Pick palettes for a terminal form")]
struct Args {
    /// JSON palette catalog to load instead of the default one.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Form configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write logs while the TUI owns the terminal.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = args.log_file.clone().unwrap_or_else(|| huepick_config_dir().join(LOG_FILE_NAME));
    init_tracing(&log_path)?;

    let catalog = load_catalog(args.catalog.as_deref()).context("failed to load palette catalog")?;
    let config = AppConfig::resolve(args.config.as_deref()).context("failed to load form configuration")?;
    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(error = %error, "Preferences unavailable; selections will not be remembered");
        UserPreferences::ephemeral()
    });
    info!(palettes = catalog.len(), fields = config.fields.len(), "starting huepick");

    huepick_tui::run(Rc::new(catalog), config, preferences).await
}

fn init_tracing(log_path: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = open_log_file(log_path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_into_paths() {
        let args = Args::parse_from(["huepick", "--catalog", "p.json", "--config", "c.json", "--log-file", "out.log"]);
        assert_eq!(args.catalog.as_deref(), Some(Path::new("p.json")));
        assert_eq!(args.config.as_deref(), Some(Path::new("c.json")));
        assert_eq!(args.log_file.as_deref(), Some(Path::new("out.log")));
    }

    #[test]
    fn flags_are_optional() {
        let args = Args::parse_from(["huepick"]);
        assert!(args.catalog.is_none() && args.config.is_none() && args.log_file.is_none());
    }

    #[test]
    fn log_file_parent_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("huepick.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }
}
