//! Input decoding: base64 string → raw PDF bytes.
//!
//! The service accepts documents as base64 text so they can travel inside a
//! JSON body. Decoding is strict standard base64 (`+`/`/`, padded); anything
//! else is a caller error surfaced verbatim, never retried. No PDF structure
//! validation happens here — that is the open stage's job.

use crate::error::ExtractError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Decode a base64-encoded PDF into raw bytes.
///
/// An input that decodes to an empty byte sequence is treated as a decode
/// failure: there is no document to hand to the next stage.
pub fn decode_pdf(encoded: &str) -> Result<Vec<u8>, ExtractError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ExtractError::Decode {
            reason: e.to_string(),
        })?;

    if bytes.is_empty() {
        return Err(ExtractError::Decode {
            reason: "input decoded to zero bytes".into(),
        });
    }

    debug!("Decoded {} bytes of PDF data", bytes.len());
    Ok(bytes)
}
