//! Error types for the pdf2text library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — **Fatal**: the extraction cannot proceed at all
//!   (bad base64, unparseable document, wrong passwords). Returned as
//!   `Err(ExtractError)` from the top-level `extract*` functions.
//!
//! * [`OcrError`] — **Recoverable**: the OCR collaborator could not be
//!   invoked or a recognition run failed. The orchestrator recovers by
//!   falling back to native text, except under forced OCR where the caller
//!   explicitly required recognition and the failure is surfaced as
//!   [`ExtractError::OcrUnavailable`].
//!
//! The separation lets callers branch on cause: a 400-class "fix your input"
//! failure versus a degraded-but-successful extraction.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2text library.
///
/// Each variant names the failing pipeline stage so a caller (or an HTTP
/// error body) can report a single descriptive message: decode, open,
/// authenticate, or forced-OCR.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Decode stage ──────────────────────────────────────────────────────
    /// The input string is not valid standard base64, or decodes to nothing.
    #[error("Base64 decode failed: {reason}\nThe document must be supplied as standard base64-encoded PDF bytes.")]
    Decode { reason: String },

    // ── Open stage ────────────────────────────────────────────────────────
    /// The decoded bytes are not a parseable PDF document.
    #[error("Cannot open PDF document: {detail}")]
    Open { detail: String },

    /// The document is encrypted and every supplied candidate password was
    /// rejected. Covers the empty-list case (`tried == 0`).
    #[error("PDF password verification failed: the document is encrypted and none of the supplied passwords were accepted ({tried} tried)")]
    Authentication { tried: usize },

    // ── OCR stage ─────────────────────────────────────────────────────────
    /// Forced OCR was requested but the OCR engine cannot be invoked.
    ///
    /// Outside of forced OCR this condition is recovered internally and
    /// never reaches the caller.
    #[error("OCR engine unavailable: {detail}\nInstall tesseract (with the language data for your OCR profile) or remove the forced-OCR flag.")]
    OcrUnavailable { detail: String },

    // ── I/O (decrypt-resave) ──────────────────────────────────────────────
    /// Could not write the decrypted copy of a document.
    #[error("Failed to save decrypted PDF to '{path}': {detail}")]
    Save { path: PathBuf, detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (blocking-task join failure etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A recoverable failure from the OCR collaborator.
///
/// [`Unavailable`](OcrError::Unavailable) means the engine itself cannot run
/// (binary missing, misconfigured) and aborts the OCR pass as a whole.
/// [`Recognition`](OcrError::Recognition) is scoped to a single page; the
/// per-page loop replaces that page with a placeholder and continues.
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    /// The OCR engine cannot be invoked at all.
    #[error("OCR engine not available: {0}")]
    Unavailable(String),

    /// A single recognition run failed.
    #[error("OCR recognition failed: {0}")]
    Recognition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_display() {
        let e = ExtractError::Decode {
            reason: "Invalid symbol 33".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("base64"), "got: {msg}");
        assert!(msg.contains("Invalid symbol 33"));
    }

    #[test]
    fn authentication_display_names_passwords() {
        let e = ExtractError::Authentication { tried: 2 };
        let msg = e.to_string();
        assert!(msg.contains("password"), "got: {msg}");
        assert!(msg.contains("2 tried"));
    }

    #[test]
    fn authentication_display_empty_list() {
        let e = ExtractError::Authentication { tried: 0 };
        let msg = e.to_string();
        assert!(msg.contains("password"));
        assert!(msg.contains("0 tried"));
    }

    #[test]
    fn open_display_is_distinct_from_authentication() {
        let e = ExtractError::Open {
            detail: "FormatError".into(),
        };
        assert!(!e.to_string().contains("password"));
    }

    #[test]
    fn ocr_unavailable_display() {
        let e = ExtractError::OcrUnavailable {
            detail: "tesseract: No such file or directory".into(),
        };
        assert!(e.to_string().contains("tesseract"));
    }
}
