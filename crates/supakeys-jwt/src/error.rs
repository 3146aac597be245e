//! Error types for secret generation and token signing.

use thiserror::Error;

/// Errors that can occur while generating secrets or handling tokens.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The secure random source could not supply bytes.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Failed to serialize a token header or payload.
    #[error("failed to encode token segment: {0}")]
    EncodingFailure(String),

    /// The secret was rejected as an HMAC key.
    #[error("invalid signing key: {0}")]
    SigningKeyInvalid(String),

    /// Failed to parse token.
    #[error("failed to parse token: {0}")]
    TokenParseFailed(String),

    /// Token verification failed.
    #[error("token verification failed: {0}")]
    VerificationFailed(String),
}
