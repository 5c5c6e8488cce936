/// Replay configuration
use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempo_playback::PlaybackConfig;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tempo.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Indent the output JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl ReplayConfig {
    /// Load configuration from `tempo.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from `path` and environment
    ///
    /// An explicit path must exist. Environment variables override file
    /// values, e.g. `TEMPO_PLAYBACK__SEEK_STEP=30`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ReplayError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with TEMPO_)
        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ReplayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ReplayError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.seek_step == 0 {
            return Err(ReplayError::Config(
                "playback.seek_step must be greater than zero".to_string(),
            ));
        }

        if self.playback.listen_history_size == 0 {
            return Err(ReplayError::Config(
                "playback.listen_history_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = ReplayConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.output.pretty);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = toml_file(
            r#"
            [playback]
            seek_step = 30
            ad_duration = 5

            [output]
            pretty = false
            "#,
        );

        let config = ReplayConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.playback.seek_step, 30);
        assert_eq!(config.playback.ad_duration, 5);
        assert_eq!(config.playback.listen_history_size, 100);
        assert!(!config.output.pretty);
    }

    #[test]
    fn serialized_config_loads_back() {
        let mut saved = ReplayConfig::default();
        saved.playback.restart_threshold = 3;

        let file = toml_file(&toml::to_string(&saved).unwrap());
        let loaded = ReplayConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ReplayConfig::load_from(Some(Path::new("/nonexistent/tempo.toml"))).unwrap_err();
        assert!(matches!(err, ReplayError::Config(msg) if msg.contains("not found")));
    }

    #[test]
    fn zero_seek_step_fails_validation() {
        let mut config = ReplayConfig::default();
        config.playback.seek_step = 0;
        assert!(config.validate().is_err());
    }
}
