//! AES-256-GCM envelope for the resolution RPC payload.
//!
//! Wire construction: a random 12-byte nonce prepended to the ciphertext,
//! the 16-byte GCM tag appended, the whole base64-encoded. No additional
//! authenticated data. Keys are supplied as 64 hex digits (32 bytes).

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use veil_dns_domain::DomainError;

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;

/// Shared by all request paths; safe for concurrent use.
pub struct EnvelopeCipher {
    cipher: Aes256Gcm,
}

impl EnvelopeCipher {
    pub fn new(hex_key: &str) -> Result<Self, DomainError> {
        let key = hex::decode(hex_key)
            .map_err(|e| DomainError::InvalidEncryptionKey(format!("invalid hex key: {}", e)))?;

        if key.len() != KEY_SIZE {
            return Err(DomainError::InvalidEncryptionKey(
                "key must be 32 bytes (256 bits)".to_string(),
            ));
        }

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| DomainError::InvalidEncryptionKey(e.to_string()))?;

        Ok(Self { cipher })
    }

    /// Encrypt `plaintext` and return base64(nonce || ciphertext || tag).
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, DomainError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| DomainError::InvalidEnvelope("encryption failed".to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(sealed))
    }

    /// Decrypt a base64(nonce || ciphertext || tag) envelope.
    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>, DomainError> {
        let sealed = BASE64
            .decode(encoded)
            .map_err(|e| DomainError::InvalidEnvelope(format!("invalid base64: {}", e)))?;

        if sealed.len() < NONCE_SIZE {
            return Err(DomainError::InvalidEnvelope(
                "ciphertext too short".to_string(),
            ));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DomainError::InvalidEnvelope("authentication failed".to_string()))
    }

    /// Generate a random 256-bit key as 64 hex digits, for provisioning
    /// both tiers.
    pub fn generate_key() -> String {
        let key = Aes256Gcm::generate_key(&mut OsRng);
        hex::encode(key)
    }
}
