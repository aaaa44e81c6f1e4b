//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! stock demo setup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::Locale;
use crate::session::DemoAuthenticator;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub session: SessionConfig,
    pub directory: DirectoryConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Demo account accepted by the login gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub username: String,
    pub password: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let demo = DemoAuthenticator::default();
        Self {
            username: demo.username().to_string(),
            password: demo.password().to_string(),
        }
    }
}

impl SessionConfig {
    pub fn authenticator(&self) -> DemoAuthenticator {
        DemoAuthenticator::new(self.username.clone(), self.password.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Start the session with the bundled demo patients
    pub seed_demo_data: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { seed_demo_data: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "psy_manager_core=info".into(),
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a config file, falling back to defaults on any failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io { .. }) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.session.username, "admin");
        assert_eq!(config.session.password, "123456");
        assert!(config.directory.seed_demo_data);
        assert_eq!(config.display.locale, Locale::Es);
        assert_eq!(config.logging.filter, "psy_manager_core=info");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CoreConfig::from_toml_str("").unwrap(), CoreConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[session]
username = "dra.lopez"

[display]
locale = "en"
"#;
        let config = CoreConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.session.username, "dra.lopez");
        assert_eq!(config.session.password, "123456");
        assert_eq!(config.display.locale, Locale::En);
        assert!(config.directory.seed_demo_data);
    }

    #[test]
    fn test_invalid_toml() {
        let err = CoreConfig::from_toml_str("[display]\nlocale = \"fr\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[directory]\nseed_demo_data = false").unwrap();

        let config = CoreConfig::load(file.path()).unwrap();
        assert!(!config.directory.seed_demo_data);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = CoreConfig::load_or_default(Some(path.as_path()));
        assert_eq!(config, CoreConfig::default());
        assert_eq!(CoreConfig::load_or_default(None), CoreConfig::default());
    }

    #[test]
    fn test_authenticator_from_config() {
        let config = CoreConfig::from_toml_str("[session]\nusername = \"u\"\npassword = \"p\"").unwrap();
        let auth = config.session.authenticator();
        assert_eq!(auth.username(), "u");
        assert_eq!(auth.password(), "p");
    }
}
