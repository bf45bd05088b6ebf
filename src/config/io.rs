//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::info;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.zikir/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".zikir")
    }

    /// Get the global config file path (~/.zikir/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Validate the reward tables, then write the config atomically.
    ///
    /// A config that `serve` would refuse is never written. Writers hold an
    /// exclusive lock on a sibling `.lock` file and replace the config by
    /// renaming a fully synced temp file over it.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.build_engine()
            .context("Refusing to save invalid reward tables")?;

        let body = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let content = format!("{CONFIG_HEADER}\n{body}");

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.with_extension("toml.lock"))
            .context("Failed to open config lock")?;
        lock.lock_exclusive().context("Failed to acquire config lock")?;

        let staged = path.with_extension("toml.tmp");
        replace_with(&staged, path, content.as_bytes())?;

        info!("[zikir:config] Saved config to {}", path.display());
        Ok(())
    }

    /// Load global configuration from ~/.zikir/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            Self::auto_init()?;
        }

        Self::from_file(&global_path)
    }

    /// Write the default config to the global location
    fn auto_init() -> Result<()> {
        let path = Self::global_config_path();
        info!("[zikir:config] Creating default config at {}", path.display());
        Self::default().save_to_file(&path)
    }
}

const CONFIG_HEADER: &str = "\
# Zikir gamification config
#
# [rewards] converts counted zikir into currencies. [[levels]], [[badges]]
# and [[milestones]] are validated when the server starts.
";

/// Write `bytes` to `staged`, sync, then rename it over `target`
fn replace_with(staged: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(staged)
        .with_context(|| format!("Failed to create temp file: {}", staged.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write {}", staged.display()))?;
    std::fs::rename(staged, target)
        .with_context(|| format!("Failed to replace config file: {}", target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.settings.server.http_port = 9999;
        config.rewards.counts_per_noor = 99;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.settings.server.http_port, 9999);
        assert_eq!(loaded.rewards.counts_per_noor, 99);
        assert_eq!(loaded.levels.len(), config.levels.len());
        assert_eq!(loaded.badges.len(), config.badges.len());
        assert!(!path.with_extension("toml.tmp").exists());
        loaded.build_engine().unwrap();
    }

    #[test]
    fn test_invalid_tables_are_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.levels.clear();
        assert!(config.save_to_file(&path).is_err());
        assert!(!path.exists());

        Config::default().save_to_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Zikir gamification config"));
    }
}
