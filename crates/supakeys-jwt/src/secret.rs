//! Random secret generation.

use crate::encoding::encode_secret;
use crate::error::JwtError;
use rand::TryRngCore;
use rand::rngs::OsRng;
use std::fmt;

/// Number of random bytes in a secret.
pub const SECRET_LEN: usize = 32;

/// A random secret, held as raw bytes and their base64 text.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    bytes: [u8; SECRET_LEN],
    encoded: String,
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

impl Secret {
    /// Generate a new secret from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, JwtError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new secret from the given random source.
    pub fn generate_with<R: TryRngCore>(rng: &mut R) -> Result<Self, JwtError> {
        let mut bytes = [0u8; SECRET_LEN];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| JwtError::EntropyUnavailable(e.to_string()))?;

        Ok(Self::from_bytes(&bytes))
    }

    /// Wrap existing secret bytes.
    pub fn from_bytes(bytes: &[u8; SECRET_LEN]) -> Self {
        Self {
            bytes: *bytes,
            encoded: encode_secret(bytes),
        }
    }

    /// The base64 text of the secret.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The raw random bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.bytes
    }
}

/// Generate a new secret from the operating system's CSPRNG.
pub fn generate_secret() -> Result<Secret, JwtError> {
    let secret = Secret::generate()?;
    tracing::debug!(len = SECRET_LEN, "Generated random secret");
    Ok(secret)
}
