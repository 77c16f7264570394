use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Status of config file loading
#[derive(Debug, Clone)]
pub enum ConfigLoadStatus {
    /// Config loaded successfully from existing file
    Loaded,
    /// Created default config file (first run)
    Created,
    /// Error occurred during loading, using defaults.
    /// String is used in Debug output for logging.
    #[allow(dead_code)]
    Error(String),
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Number of frames the cosmetic thinking spinner is shown before the
    /// advice (already computed) appears. 0 disables the spinner.
    pub thinking_frames: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            thinking_frames: 12,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Loaded configuration with metadata
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub config_path: PathBuf,
    pub status: ConfigLoadStatus,
}

/// Get the platform-appropriate config directory
fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "moneymind", "moneymind").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the full path to the config file
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load configuration from file, environment, and defaults
pub fn load_config() -> LoadedConfig {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => {
            warn!("Could not determine config directory, using defaults");
            return LoadedConfig {
                config: apply_env_overrides(Config::default()),
                config_path: PathBuf::from("config.toml"),
                status: ConfigLoadStatus::Error("Could not determine config directory".to_string()),
            };
        }
    };

    debug!("Config path: {:?}", config_path);

    let (config, status) = load_or_create_config(&config_path);
    let config = apply_env_overrides(config);

    LoadedConfig {
        config,
        config_path,
        status,
    }
}

/// Load config from file, or create default if not exists
pub fn load_or_create_config(config_path: &Path) -> (Config, ConfigLoadStatus) {
    match fs::read_to_string(config_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => {
                info!("Loaded config from {:?}", config_path);
                (config, ConfigLoadStatus::Loaded)
            }
            Err(e) => {
                warn!(
                    "Config file malformed at {:?}: {}. Using defaults.",
                    config_path, e
                );
                (
                    Config::default(),
                    ConfigLoadStatus::Error(format!("Malformed TOML: {}", e)),
                )
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Config doesn't exist, create default
            create_default_config(config_path)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(
                "Permission denied reading config at {:?}. Using defaults.",
                config_path
            );
            (
                Config::default(),
                ConfigLoadStatus::Error("Permission denied reading config".to_string()),
            )
        }
        Err(e) => {
            warn!(
                "Error reading config at {:?}: {}. Using defaults.",
                config_path, e
            );
            (
                Config::default(),
                ConfigLoadStatus::Error(format!("Read error: {}", e)),
            )
        }
    }
}

/// Create the default config file
fn create_default_config(config_path: &Path) -> (Config, ConfigLoadStatus) {
    let config = Config::default();

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!(
            "Could not create config directory {:?}: {}. Continuing without file.",
            parent, e
        );
        return (
            config,
            ConfigLoadStatus::Error(format!("Could not create config directory: {}", e)),
        );
    }

    // Serialize to TOML
    let toml_content = match toml::to_string_pretty(&config) {
        Ok(s) => s,
        Err(e) => {
            warn!("Could not serialize default config: {}", e);
            return (
                config,
                ConfigLoadStatus::Error(format!("Serialization error: {}", e)),
            );
        }
    };

    // Write file
    match fs::write(config_path, &toml_content) {
        Ok(()) => {
            info!("Created default config at {:?}", config_path);
            (config, ConfigLoadStatus::Created)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(
                "Permission denied creating config at {:?}. Continuing without file.",
                config_path
            );
            (
                config,
                ConfigLoadStatus::Error("Permission denied creating config".to_string()),
            )
        }
        Err(e) => {
            warn!(
                "Could not write default config to {:?}: {}. Continuing without file.",
                config_path, e
            );
            (
                config,
                ConfigLoadStatus::Error(format!("Write error: {}", e)),
            )
        }
    }
}

/// Apply environment variable overrides to config
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(level) = env::var("MONEYMIND_LOG") {
        debug!("Overriding logging.level from MONEYMIND_LOG");
        config.logging.level = level;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ui.thinking_frames, 12);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[logging]
level = "debug"

[ui]
thinking_frames = 0
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.ui.thinking_frames, 0);
    }

    #[test]
    fn test_config_partial_deserialization() {
        // Only logging section specified, ui should use defaults
        let toml_str = r#"
[logging]
level = "trace"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.ui.thinking_frames, 12);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let toml_str = r#"
[logging]
level = "warn"
unknown_key = "should be ignored"

[unknown_section]
foo = "bar"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
            ui: UiConfig { thinking_frames: 5 },
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.logging.level, "debug");
        assert_eq!(parsed.ui.thinking_frames, 5);
    }

    #[test]
    fn test_load_or_create_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (config, status) = load_or_create_config(&path);
        assert!(matches!(status, ConfigLoadStatus::Created));
        assert_eq!(config.logging.level, "info");
        assert!(path.exists());

        // Second load reads the file that was just written
        let (config, status) = load_or_create_config(&path);
        assert!(matches!(status, ConfigLoadStatus::Loaded));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_or_create_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let (config, status) = load_or_create_config(&path);
        assert!(matches!(status, ConfigLoadStatus::Error(_)));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ui.thinking_frames, 12);
    }
}
