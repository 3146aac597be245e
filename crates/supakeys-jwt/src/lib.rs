//! # supakeys-jwt
//!
//! Secrets and API keys for bootstrapping a self-hosted Supabase deployment.
//!
//! This crate provides functionality for:
//! - Generating 32-byte random secrets, base64 encoded
//! - Signing HS256 role tokens (`anon`, `service_role`) with a shared secret
//! - Verifying and inspecting those tokens
//!
//! ## Token Shape
//!
//! | Segment | Contents |
//! |---------|----------|
//! | Header | `{"alg":"HS256","typ":"JWT"}` |
//! | Payload | `{"role":..,"iss":"supabase","iat":..,"exp":..}` |
//! | Signature | HMAC-SHA256 over `header.payload` |
//!
//! Each segment is base64url encoded without padding. Tokens expire ten
//! years after they are issued.

pub mod claims;
pub mod clock;
pub mod encoding;
pub mod error;
pub mod secret;
pub mod token;

pub use claims::{ANON_ROLE, SERVICE_ROLE, TokenHeader, TokenPayload};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::JwtError;
pub use secret::{Secret, generate_secret};
pub use token::{TokenSigner, TokenVerifier, VerifiedToken, inspect_token_unverified, sign};
