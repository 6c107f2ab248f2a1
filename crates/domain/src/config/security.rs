use serde::{Deserialize, Serialize};

/// Shared security settings. `api_keys` is only meaningful on the remote
/// tier; the local tier authenticates per endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub api_keys: Vec<String>,

    #[serde(default)]
    pub encryption_enabled: bool,

    /// 64 hex digits (32 bytes) for AES-256-GCM.
    #[serde(default)]
    pub encryption_key: String,
}

impl SecurityConfig {
    pub fn validate_encryption_key(&self) -> Result<(), String> {
        if self.encryption_enabled && self.encryption_key.len() != 64 {
            return Err("encryption key must be 64 hex characters (32 bytes)".to_string());
        }
        Ok(())
    }
}
