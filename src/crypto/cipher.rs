//! Credential cipher
//!
//! Symmetric encryption for secrets at rest in test data, so passwords
//! never appear in plaintext spreadsheets or feature files. AES-256-GCM
//! with the key derived from a pre-shared passphrase held in
//! configuration; the wire form is base64(nonce || ciphertext).

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Credential cipher errors. Decryption is all-or-nothing: any failure
/// yields an error, never a silently-wrong plaintext.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Ciphertext is not valid base64")]
    InvalidEncoding,

    #[error("Ciphertext is too short to contain a nonce")]
    Malformed,

    #[error("Decryption failed: ciphertext is corrupted or was produced with a different key")]
    DecryptFailed,

    #[error("Decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("Encryption failed")]
    EncryptFailed,
}

/// Symmetric encrypt/decrypt for credential strings.
///
/// Constructed once per process from the configured passphrase; key
/// material lives in memory only and is never persisted or logged.
pub struct CredentialCipher {
    cipher: Aes256Gcm,
}

impl CredentialCipher {
    /// Derive the AES-256 key from the passphrase with SHA-256.
    pub fn new(secret: &str) -> Self {
        let key_bytes = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
        Self { cipher }
    }

    /// Encrypt a plaintext string. The nonce is random per call, so two
    /// encryptions of the same plaintext produce different ciphertexts.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(raw))
    }

    /// Decrypt a base64 ciphertext produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails on bad encoding, truncation, tampering, or a key mismatch.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let raw = BASE64
            .decode(ciphertext.trim())
            .map_err(|_| CryptoError::InvalidEncoding)?;
        if raw.len() <= NONCE_LEN {
            return Err(CryptoError::Malformed);
        }
        let (nonce_bytes, payload) = raw.split_at(NONCE_LEN);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), payload)
            .map_err(|_| CryptoError::DecryptFailed)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> CredentialCipher {
        CredentialCipher::new("MySecretKeyForSecurity25")
    }

    #[test]
    fn test_round_trip() {
        let cipher = cipher();
        for plaintext in ["Password@123", "", "unicode: héllo wörld 漢字", "a"] {
            let encrypted = cipher.encrypt(plaintext).unwrap();
            assert_eq!(cipher.decrypt(&encrypted).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_ciphertext_is_not_plaintext() {
        let cipher = cipher();
        let encrypted = cipher.encrypt("Password@123").unwrap();
        assert!(!encrypted.contains("Password@123"));
    }

    #[test]
    fn test_nonce_makes_ciphertexts_differ() {
        let cipher = cipher();
        let one = cipher.encrypt("Password@123").unwrap();
        let two = cipher.encrypt("Password@123").unwrap();
        assert_ne!(one, two);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let cipher = cipher();
        let encrypted = cipher.encrypt("Password@123").unwrap();

        let mut raw = BASE64.decode(&encrypted).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = BASE64.encode(raw);

        assert!(matches!(
            cipher.decrypt(&tampered),
            Err(CryptoError::DecryptFailed)
        ));
    }

    #[test]
    fn test_non_base64_input_fails() {
        assert!(matches!(
            cipher().decrypt("not base64 at all!!!"),
            Err(CryptoError::InvalidEncoding)
        ));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let short = BASE64.encode([0u8; NONCE_LEN]);
        assert!(matches!(
            cipher().decrypt(&short),
            Err(CryptoError::Malformed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = cipher().encrypt("Password@123").unwrap();
        let other = CredentialCipher::new("a-different-passphrase");
        assert!(matches!(
            other.decrypt(&encrypted),
            Err(CryptoError::DecryptFailed)
        ));
    }
}
