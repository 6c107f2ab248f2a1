use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::security::SecurityConfig;
use super::server::HttpServerConfig;

/// Root configuration for the remote resolution service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RemoteConfig {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. veil-dns-remote.toml in current directory
    /// 3. /etc/veil-dns/remote.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, overrides: RemoteOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("veil-dns-remote.toml").exists() {
            Self::from_file("veil-dns-remote.toml")?
        } else if std::path::Path::new("/etc/veil-dns/remote.toml").exists() {
            Self::from_file("/etc/veil-dns/remote.toml")?
        } else {
            Self::default()
        };

        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_overrides(&mut self, overrides: RemoteOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.security.api_keys.is_empty() {
            return Err(ConfigError::Validation(
                "At least one API key is required".to_string(),
            ));
        }

        if self.resolver.upstreams.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        self.security
            .validate_encryption_key()
            .map_err(ConfigError::Validation)?;

        Ok(())
    }
}

/// Command-line overrides for the remote resolution service.
#[derive(Debug, Default)]
pub struct RemoteOverrides {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub log_level: Option<String>,
}
