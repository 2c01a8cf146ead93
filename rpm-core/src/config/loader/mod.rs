use crate::config::constants::files;
use crate::config::core::{GenerationConfig, ProgressConfig, SchoolProfile, ServerConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure loaded from `rpm.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RpmConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini model, credential variable and timeouts
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Loading-indicator curve
    #[serde(default)]
    pub progress: ProgressConfig,

    /// School identity embedded in documents
    #[serde(default)]
    pub school: SchoolProfile,
}

impl RpmConfig {
    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let default_config = RpmConfig::default();
        let config_content = toml::to_string_pretty(&default_config)
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for locating and loading `rpm.toml`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RpmConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        dirs::home_dir()
    }

    /// Load configuration from a specific workspace
    ///
    /// Lookup order: `rpm.toml`, `.rpm/rpm.toml`, `~/.rpm/rpm.toml`. Falls back
    /// to defaults when none exists.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let mut candidates = vec![
            workspace.join(files::CONFIG_FILE),
            workspace.join(files::CONFIG_DIR).join(files::CONFIG_FILE),
        ];
        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(home_dir.join(files::CONFIG_DIR).join(files::CONFIG_FILE));
        }

        for path in candidates {
            if path.exists() {
                return Self::load_from_file(&path);
            }
            debug!(path = %path.display(), "config file not present");
        }

        info!("no rpm.toml found, using default configuration");
        Ok(Self {
            config: RpmConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: RpmConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.progress = config.progress.sanitized();

        info!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RpmConfig {
        &self.config
    }

    /// Consume the manager, keeping only the configuration
    pub fn into_config(self) -> RpmConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
