//! Base64 codecs for token segments and secrets, and the JSON writer for
//! segment contents.

use crate::error::JwtError;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Compact JSON formatter that writes only printable ASCII, escaping every
/// other char as lowercase `\uXXXX` (UTF-16 surrogate pairs above the BMP).
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` as compact, ASCII-only JSON.
pub fn to_ascii_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, JwtError> {
    let mut json = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, AsciiFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| JwtError::EncodingFailure(e.to_string()))?;
    Ok(json)
}

/// Encode bytes as a token segment (base64url, all padding stripped).
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a token segment. Padded input is rejected.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, JwtError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::TokenParseFailed(e.to_string()))
}

/// Encode secret bytes as standard padded base64.
pub fn encode_secret(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
