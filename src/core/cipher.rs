//! Reversible encryption of single string fields
//!
//! Used for the user credential at rest. Blank input maps to `None` in both
//! directions. Any cryptographic failure is absorbed: the input comes back
//! unchanged and a warning is logged.
//!
//! In [`CipherMode::Ecb`] equal plaintexts always produce equal ciphertexts;
//! that mode exists to read and write records already stored that way.
//! [`CipherMode::Gcm`] prepends a random 96-bit nonce to each ciphertext.

use crate::config::{CipherConfig, CipherMode};
use crate::core::error::ConfigError;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, block_padding::Pkcs7};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use rand::RngCore;
use std::fmt;

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// Key size of AES-256
pub const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
enum CryptoFailure {
    #[error("ciphertext is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    #[error("padding check failed")]
    Padding,

    #[error("authenticated encryption failed")]
    Aead,

    #[error("ciphertext is shorter than a nonce")]
    Truncated,

    #[error("plaintext is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Symmetric cipher for a single string field
///
/// Holds only read-only key material, so one instance can be shared by any
/// number of callers.
#[derive(Clone)]
pub struct FieldCipher {
    key: [u8; KEY_LEN],
    mode: CipherMode,
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl FieldCipher {
    /// Build a cipher from raw key material
    pub fn new(key: &[u8], mode: CipherMode) -> Result<Self, ConfigError> {
        let key: [u8; KEY_LEN] = key.try_into().map_err(|_| ConfigError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
        Ok(Self { key, mode })
    }

    /// Build a cipher from configuration; the key must be present
    pub fn from_config(config: &CipherConfig) -> Result<Self, ConfigError> {
        let key = config.key.as_deref().ok_or(ConfigError::MissingCipherKey)?;
        Self::new(key.as_bytes(), config.mode)
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Encrypt a field value
    ///
    /// Returns `None` for absent or blank input, and the input itself if
    /// encryption fails.
    pub fn encrypt(&self, plaintext: Option<&str>) -> Option<String> {
        let plaintext = plaintext.filter(|value| !is_blank(value))?;
        match self.try_encrypt(plaintext) {
            Ok(ciphertext) => Some(ciphertext),
            Err(err) => {
                tracing::warn!(mode = ?self.mode, error = %err, "field encryption failed, keeping input");
                Some(plaintext.to_string())
            }
        }
    }

    /// Decrypt a field value
    ///
    /// Returns `None` for absent or blank input, and the input itself if
    /// decryption fails.
    pub fn decrypt(&self, ciphertext: Option<&str>) -> Option<String> {
        let ciphertext = ciphertext.filter(|value| !is_blank(value))?;
        match self.try_decrypt(ciphertext) {
            Ok(plaintext) => Some(plaintext),
            Err(err) => {
                tracing::warn!(mode = ?self.mode, error = %err, "field decryption failed, keeping input");
                Some(ciphertext.to_string())
            }
        }
    }

    fn try_encrypt(&self, plaintext: &str) -> Result<String, CryptoFailure> {
        let bytes = match self.mode {
            CipherMode::Ecb => Aes256EcbEnc::new(&self.key.into())
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()),
            CipherMode::Gcm => {
                let cipher = Aes256Gcm::new(&self.key.into());
                let mut nonce_bytes = [0u8; NONCE_LEN];
                rand::thread_rng().fill_bytes(&mut nonce_bytes);
                let sealed = cipher
                    .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
                    .map_err(|_| CryptoFailure::Aead)?;
                let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
                out.extend_from_slice(&nonce_bytes);
                out.extend_from_slice(&sealed);
                out
            }
        };
        Ok(BASE64.encode(bytes))
    }

    fn try_decrypt(&self, ciphertext: &str) -> Result<String, CryptoFailure> {
        let bytes = BASE64.decode(ciphertext.trim())?;
        let plain = match self.mode {
            CipherMode::Ecb => Aes256EcbDec::new(&self.key.into())
                .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
                .map_err(|_| CryptoFailure::Padding)?,
            CipherMode::Gcm => {
                if bytes.len() < NONCE_LEN {
                    return Err(CryptoFailure::Truncated);
                }
                let (nonce, sealed) = bytes.split_at(NONCE_LEN);
                Aes256Gcm::new(&self.key.into())
                    .decrypt(Nonce::from_slice(nonce), sealed)
                    .map_err(|_| CryptoFailure::Aead)?
            }
        };
        Ok(String::from_utf8(plain)?)
    }
}

fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}
