use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::security::SecurityConfig;
use super::server::DnsListenConfig;

/// Root configuration for the local resolver process.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    /// DNS listener (bind address, port, transports)
    #[serde(default)]
    pub server: DnsListenConfig,

    /// Outbound resolution RPC (endpoints, retries, selection policy)
    #[serde(default)]
    pub api: ApiConfig,

    /// Local response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Envelope encryption
    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LocalConfig {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. veil-dns-local.toml in current directory
    /// 3. /etc/veil-dns/local.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, overrides: LocalOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("veil-dns-local.toml").exists() {
            Self::from_file("veil-dns-local.toml")?
        } else if std::path::Path::new("/etc/veil-dns/local.toml").exists() {
            Self::from_file("/etc/veil-dns/local.toml")?
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

    fn apply_overrides(&mut self, overrides: LocalOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(addr) = overrides.listen_addr {
            self.server.listen_addr = addr;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.api.endpoints.is_empty() {
            return Err(ConfigError::Validation(
                "At least one API endpoint is required".to_string(),
            ));
        }

        for (i, ep) in self.api.endpoints.iter().enumerate() {
            if ep.url.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Endpoint {}: URL is required",
                    i
                )));
            }
            if ep.api_key.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Endpoint {}: API key is required",
                    i
                )));
            }
        }

        if self.cache.min_ttl_secs > self.cache.max_ttl_secs {
            return Err(ConfigError::Validation(
                "cache.min_ttl_secs cannot exceed cache.max_ttl_secs".to_string(),
            ));
        }

        self.security
            .validate_encryption_key()
            .map_err(ConfigError::Validation)?;

        Ok(())
    }
}

/// Command-line overrides for the local resolver.
#[derive(Debug, Default)]
pub struct LocalOverrides {
    pub port: Option<u16>,
    pub listen_addr: Option<String>,
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;

    fn config_with_endpoint() -> LocalConfig {
        let mut config = LocalConfig::default();
        config.api.endpoints.push(EndpointConfig {
            url: "https://one.example/api/v1/resolve".to_string(),
            api_key: "secret".to_string(),
            weight: 1,
        });
        config
    }

    #[test]
    fn default_config_fails_without_endpoints() {
        let config = LocalConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn valid_config_passes() {
        assert!(config_with_endpoint().validate().is_ok());
    }

    #[test]
    fn rejects_short_encryption_key() {
        let mut config = config_with_endpoint();
        config.security.encryption_enabled = true;
        config.security.encryption_key = "abcd1234".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_from_toml() {
        let toml = r#"
            [server]
            port = 5353
            protocol = "both"

            [[api.endpoints]]
            url = "https://one.example/api/v1/resolve"
            api_key = "secret"

            [cache]
            max_items = 500
        "#;
        let config: LocalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 5353);
        assert!(config.server.protocol.udp() && config.server.protocol.tcp());
        assert_eq!(config.cache.max_items, 500);
        assert_eq!(config.api.max_retries, 3);
        assert!(config.validate().is_ok());
    }
}
