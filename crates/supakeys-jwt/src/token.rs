//! Token signing and verification.

use crate::claims::{ALGORITHM, TokenHeader, TokenPayload};
use crate::clock::{Clock, SystemClock};
use crate::encoding::{decode_segment, encode_segment, to_ascii_json};
use crate::error::JwtError;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs HS256 role tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenSigner<C = SystemClock> {
    clock: C,
}

impl TokenSigner<SystemClock> {
    /// Create a signer that reads the wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TokenSigner<C> {
    /// Create a signer with the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Sign a token for `role`, issued now.
    ///
    /// The clock is read on every call, so two tokens signed back to back
    /// may carry different `iat` values.
    pub fn sign(&self, role: &str, secret: &str) -> Result<String, JwtError> {
        self.sign_at(role, secret, self.clock.now())
    }

    /// Sign a token for `role` issued at `iat`.
    pub fn sign_at(&self, role: &str, secret: &str, iat: i64) -> Result<String, JwtError> {
        let header_b64 = encode_json(&TokenHeader::default())?;
        let payload_b64 = encode_json(&TokenPayload::issued_at(role, iat))?;

        let signing_input = format!("{header_b64}.{payload_b64}");
        let mut mac = keyed_mac(secret)?;
        mac.update(signing_input.as_bytes());
        let signature_b64 = encode_segment(&mac.finalize().into_bytes());

        tracing::debug!(role = %role, iat, "Signed token");

        Ok(format!("{signing_input}.{signature_b64}"))
    }
}

/// Sign a token for `role`, issued now.
pub fn sign(role: &str, secret: &str) -> Result<String, JwtError> {
    TokenSigner::new().sign(role, secret)
}

fn keyed_mac(secret: &str) -> Result<HmacSha256, JwtError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| JwtError::SigningKeyInvalid(e.to_string()))
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, JwtError> {
    Ok(encode_segment(&to_ascii_json(value)?))
}

fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, JwtError> {
    let bytes = decode_segment(segment)?;
    serde_json::from_slice(&bytes).map_err(|e| JwtError::TokenParseFailed(e.to_string()))
}

/// The three segments of a token.
struct Segments<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> Result<Self, JwtError> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(JwtError::TokenParseFailed(
                "expected three '.'-separated segments".to_string(),
            )),
        }
    }

    fn signing_input(&self, token: &'a str) -> &'a str {
        &token[..self.header.len() + 1 + self.payload.len()]
    }

    fn decode(&self) -> Result<VerifiedToken, JwtError> {
        Ok(VerifiedToken {
            header: decode_json(self.header)?,
            payload: decode_json(self.payload)?,
        })
    }
}

/// Verifier for tokens signed with a shared secret.
pub struct TokenVerifier {
    secret: String,
}

impl TokenVerifier {
    /// Create a new token verifier with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a token's signature and extract its claims.
    ///
    /// Expiration is not checked; see [`TokenPayload::is_expired_at`].
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        let segments = Segments::split(token)?;
        let signature = decode_segment(segments.signature)?;

        let mut mac = keyed_mac(&self.secret)?;
        mac.update(segments.signing_input(token).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| JwtError::VerificationFailed("signature mismatch".to_string()))?;

        let verified = segments.decode()?;
        if verified.header.alg != ALGORITHM {
            return Err(JwtError::VerificationFailed(format!(
                "unsupported algorithm: {}",
                verified.header.alg
            )));
        }

        Ok(verified)
    }
}

/// A decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub header: TokenHeader,
    pub payload: TokenPayload,
}

impl VerifiedToken {
    /// The role the token was issued for.
    pub fn role(&self) -> &str {
        &self.payload.role
    }
}

/// Decode a token without checking its signature (for debugging).
pub fn inspect_token_unverified(token: &str) -> Result<VerifiedToken, JwtError> {
    Segments::split(token)?.decode()
}
