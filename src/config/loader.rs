use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{AnalysisConfig, ConfigFile};
use crate::error::{common, AnalysisError, ErrorCode, Result};

/// Per-directory configuration file name
pub const PROJECT_CONFIG_FILE: &str = "interval-stats.toml";

/// Location of the user-wide configuration file, if a home directory exists
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "interval-stats").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Builds an [`AnalysisConfig`] from defaults, files and the environment.
///
/// Later layers win: defaults, global file, project file, explicit file,
/// environment.
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new() -> Result<Self> {
        let project_dir = std::env::current_dir().map_err(|e| {
            AnalysisError::config("Could not determine the current directory").with_source(e)
        })?;
        Ok(Self {
            global_path: global_config_path(),
            project_dir,
        })
    }

    pub fn with_paths(global_path: Option<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_path,
            project_dir: project_dir.into(),
        }
    }

    /// Load all layers including environment overrides
    pub fn load(&self, explicit: Option<&Path>) -> Result<AnalysisConfig> {
        let mut config = self.load_files(explicit)?;
        config.merge_env_vars()?;
        Ok(config)
    }

    /// Load the file layers only
    pub fn load_files(&self, explicit: Option<&Path>) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::new();

        if let Some(global) = self.global_path.as_deref().filter(|p| p.exists()) {
            config.apply_file(read_config_file(global)?);
        }

        let project = self.project_dir.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            config.apply_file(read_config_file(&project)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(common::config_not_found(path));
            }
            config.apply_file(read_config_file(path)?);
        }

        Ok(config)
    }
}

/// Parse one TOML configuration file
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AnalysisError::config_with_code(
            ErrorCode::CONFIG_GENERIC,
            format!("Failed to read {}", path.display()),
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })?;

    let file: ConfigFile = toml::from_str(&content).map_err(|e| {
        AnalysisError::config_with_code(
            ErrorCode::CONFIG_INVALID_TOML,
            format!("Invalid configuration: {}", e.message()),
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })?;

    debug!("Loaded configuration from {}", path.display());
    Ok(file)
}
