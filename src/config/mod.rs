use crate::models::UserConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the YAML settings file.
///
/// Settings live in `nifopt Config.yaml` inside the configuration
/// directory; a missing file yields defaults rather than an error.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager rooted at `config_dir`, creating the
    /// directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {config_dir}"))?;
        }

        Ok(Self {
            user_config_path: config_dir.join("nifopt Config.yaml"),
            config_dir,
        })
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load the user configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
            return Ok(UserConfig::default());
        }

        let file_contents = fs::read_to_string(&self.user_config_path)
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        let config: UserConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    /// Save the user configuration.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetGame;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(utf8_dir(&dir)).unwrap();

        let config = manager.load_user_config().unwrap();
        assert!(config.settings.recursive);
        assert_eq!(config.settings.target_game, TargetGame::Sse);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(utf8_dir(&dir)).unwrap();

        let mut config = UserConfig::default();
        config.settings.folder = "D:/Mods/Data".to_string();
        config.settings.target_game = TargetGame::Le;
        config.settings.smooth_normals = true;
        config.settings.smooth_angle = 45;

        manager.save_user_config(&config).unwrap();
        let reloaded = manager.load_user_config().unwrap();

        assert_eq!(reloaded.settings.folder, "D:/Mods/Data");
        assert_eq!(reloaded.settings.target_game, TargetGame::Le);
        assert!(reloaded.settings.smooth_normals);
        assert_eq!(reloaded.settings.smooth_angle, 45);
    }

    #[test]
    fn test_config_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = utf8_dir(&dir).join("nested").join("config");

        let manager = ConfigManager::new(&nested).unwrap();
        assert!(manager.config_dir().exists());
    }
}
