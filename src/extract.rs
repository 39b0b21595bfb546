//! Extraction orchestrator: the decision pipeline tying the stages together.
//!
//! ## Why spawn_blocking?
//!
//! pdfium wraps a C++ library with thread-local state and is not safe to
//! call from async contexts, and tesseract runs as a blocking subprocess.
//! The async entry point moves one whole extraction onto a dedicated
//! blocking-pool thread; within that call the pipeline is synchronous and
//! strictly sequential, so page order in the output always matches document
//! page order.
//!
//! ## Decision flow
//!
//! ```text
//! decode ─▶ open/authenticate ─┬─ force_ocr ──▶ OCR all pages (no judge)
//!                              └─ otherwise ──▶ native text ─▶ judge
//!                                     readable ◀─┘    └─▶ garbled ─▶ OCR
//!                                                               │
//!                                  OCR readable → OCR text  ◀───┤
//!                                  OCR garbled/failed → native ◀┘
//! ```
//!
//! OCR-path failures never fail the call once native text exists: suspect
//! native output beats no output. Only decode, open, and authentication
//! failures (and an unavailable engine under forced OCR) reach the caller.

use crate::config::ExtractOptions;
use crate::error::{ExtractError, OcrError};
use crate::pipeline::ocr::{self, OcrEngine, TesseractOcr};
use crate::pipeline::validity::judge;
use crate::pipeline::{decode, document};
use pdfium_render::prelude::*;
use std::sync::Arc;
use tracing::{info, warn};

/// Extract plain text from a base64-encoded PDF.
///
/// This is the primary entry point for the library. The blocking pipeline
/// runs on the tokio blocking pool; see [`extract_text_blocking`] for the
/// synchronous equivalent.
///
/// # Arguments
/// * `encoded`   — the PDF as standard base64 text
/// * `passwords` — candidate passwords, tried in order for encrypted
///   documents; ignored for unprotected ones
/// * `options`   — OCR routing and judging configuration
///
/// # Errors
/// One of the fatal [`ExtractError`] kinds: `Decode`, `Open`,
/// `Authentication`, or — under forced OCR only — `OcrUnavailable`.
pub async fn extract_text(
    encoded: impl AsRef<str>,
    passwords: &[String],
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let encoded = encoded.as_ref().to_string();
    let passwords = passwords.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || extract_text_blocking(&encoded, &passwords, &options))
        .await
        .map_err(|e| ExtractError::Internal(format!("extraction task panicked: {e}")))?
}

/// Synchronous extraction from a base64-encoded PDF.
pub fn extract_text_blocking(
    encoded: &str,
    passwords: &[String],
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let bytes = decode::decode_pdf(encoded)?;
    extract_bytes_blocking(&bytes, passwords, options)
}

/// Synchronous extraction from raw PDF bytes, for callers that already hold
/// the decoded document (the CLI reads files directly).
pub fn extract_bytes_blocking(
    bytes: &[u8],
    passwords: &[String],
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let pdfium = Pdfium::default();
    let document = document::open_and_authenticate(&pdfium, bytes, passwords)?;
    info!("PDF opened: {} pages", document.pages().len());

    let engine = resolve_ocr_engine(options);

    // The document handle is released when it drops at the end of this
    // scope, on success and on every error path out of run_pipeline.
    run_pipeline(&document, engine.as_ref(), options)
}

/// The state machine over one open document.
fn run_pipeline(
    document: &PdfDocument<'_>,
    engine: &dyn OcrEngine,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    if options.force_ocr {
        // Caller explicitly opted in: the result is returned unjudged, and
        // an engine that cannot run is a hard error rather than a fallback.
        return ocr::ocr_document(document, engine, &options.ocr_language).map_err(|e| {
            ExtractError::OcrUnavailable {
                detail: e.to_string(),
            }
        });
    }

    let native = document::native_text(document);
    let verdict = judge(&native, options.readable_threshold);
    if verdict.readable {
        return Ok(native);
    }

    info!(
        ratio = verdict.ratio,
        threshold = options.readable_threshold,
        "native text judged garbled, attempting OCR fallback"
    );

    let ocr_outcome = ocr::ocr_document(document, engine, &options.ocr_language);
    Ok(select_fallback_text(
        native,
        ocr_outcome,
        options.readable_threshold,
    ))
}

/// Decide between suspect native text and the OCR attempt.
///
/// Native text is the floor: an OCR failure or a still-garbled OCR result
/// returns the native text unchanged rather than raising — best-effort text
/// over total failure. The rejected OCR attempt is logged but not reported
/// to the caller.
fn select_fallback_text(
    native: String,
    ocr_outcome: Result<String, OcrError>,
    threshold: f32,
) -> String {
    match ocr_outcome {
        Err(e) => {
            warn!("OCR fallback unavailable, keeping native text: {e}");
            native
        }
        Ok(ocr_text) => {
            let verdict = judge(&ocr_text, threshold);
            if verdict.readable {
                info!(ratio = verdict.ratio, "OCR fallback produced readable text");
                ocr_text
            } else {
                info!(
                    ratio = verdict.ratio,
                    "OCR attempted but result still garbled, keeping native text"
                );
                native
            }
        }
    }
}

fn resolve_ocr_engine(options: &ExtractOptions) -> Arc<dyn OcrEngine> {
    options
        .ocr_engine
        .clone()
        .unwrap_or_else(|| Arc::new(TesseractOcr::new()))
}
