use super::{global_config_dir, EngineConfig, CONFIG_FILE_NAME, PROJECT_CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Reads and layers the configuration files
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_dir: PathBuf,
}

impl ConfigLoader {
    /// Loader for the user's global file and the project file in `project_dir`
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let global_path = global_config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok();

        Self {
            global_path,
            project_dir: project_dir.into(),
        }
    }

    /// Use `path` instead of the default global file, or no global file at all
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    /// Load every layer, including environment overrides
    pub async fn load(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();

        if let Some(global_path) = &self.global_path {
            if let Some(global) = Self::load_optional(global_path).await? {
                config = config.overlay(global);
            }
        }

        let project_path = self.project_dir.join(PROJECT_CONFIG_FILE_NAME);
        if let Some(project) = Self::load_optional(&project_path).await? {
            config = config.overlay(project);
        }

        config.merge_env_vars();
        Ok(config)
    }

    /// Parse one configuration file, which must exist
    pub async fn load_file(path: &Path) -> Result<EngineConfig> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    async fn load_optional(path: &Path) -> Result<Option<EngineConfig>> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::load_file(path).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_project_file_overrides_global_file() {
        let global_dir = TempDir::new().unwrap();
        let project_dir = TempDir::new().unwrap();
        let global_path = global_dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(
            &global_path,
            "log_level = \"debug\"\n[custom_variables]\n_owner = \"global\"\n",
        )
        .unwrap();
        std::fs::write(
            project_dir.path().join(PROJECT_CONFIG_FILE_NAME),
            "[custom_variables]\n_owner = \"project\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new(project_dir.path())
            .with_global_path(Some(global_path))
            .load()
            .await
            .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.custom_variables["_owner"], "project");
    }

    #[tokio::test]
    async fn test_missing_files_give_defaults() {
        let project_dir = TempDir::new().unwrap();
        let config = ConfigLoader::new(project_dir.path())
            .with_global_path(None)
            .load()
            .await
            .unwrap();
        assert_eq!(config.no_escape_keys(), ["alias"]);
        assert!(config.custom_variables.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_reported() {
        let project_dir = TempDir::new().unwrap();
        let path = project_dir.path().join(PROJECT_CONFIG_FILE_NAME);
        std::fs::write(&path, "shell = [").unwrap();

        let err = ConfigLoader::load_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
