//! Token header and payload claims.

use serde::{Deserialize, Serialize};

/// Signing algorithm named in every token header.
pub const ALGORITHM: &str = "HS256";

/// Token type named in every token header.
pub const TOKEN_TYPE: &str = "JWT";

/// Issuer claim of every token.
pub const ISSUER: &str = "supabase";

/// Tokens expire ten years (365-day years) after issuance.
pub const TOKEN_LIFETIME_SECS: i64 = 315_360_000;

/// Role for the public, row-level-security restricted key.
pub const ANON_ROLE: &str = "anon";

/// Role for the privileged key that bypasses row level security.
pub const SERVICE_ROLE: &str = "service_role";

/// Token header. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Token payload. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Role name (e.g., "anon", "service_role"). Not validated.
    pub role: String,

    /// Issuer, always "supabase" for minted tokens.
    pub iss: String,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,

    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenPayload {
    /// Payload for `role` issued at `iat`.
    pub fn issued_at(role: impl Into<String>, iat: i64) -> Self {
        Self {
            role: role.into(),
            iss: ISSUER.to_string(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }

    /// Seconds between issuance and expiration.
    pub fn lifetime(&self) -> i64 {
        self.exp - self.iat
    }

    /// Check if the token has expired at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_serializes_compactly() {
        let json = serde_json::to_string(&TokenHeader::default()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_payload_key_order() {
        let payload = TokenPayload::issued_at(ANON_ROLE, 1_700_000_000);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"role":"anon","iss":"supabase","iat":1700000000,"exp":2015360000}"#
        );
    }

    #[test]
    fn test_payload_expiry() {
        let payload = TokenPayload::issued_at(SERVICE_ROLE, 100);
        assert_eq!(payload.lifetime(), TOKEN_LIFETIME_SECS);
        assert!(!payload.is_expired_at(100));
        assert!(payload.is_expired_at(100 + TOKEN_LIFETIME_SECS));
    }

    #[test]
    fn test_role_is_opaque() {
        let payload = TokenPayload::issued_at("", 0);
        assert_eq!(payload.role, "");
        assert_eq!(payload.iss, ISSUER);
    }
}
