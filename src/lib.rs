//! # pdf2text
//!
//! Extract plain text from PDF documents supplied as base64 byte blobs,
//! transparently handling password-protected files and files whose embedded
//! text is unreliable (broken font encodings, scanned pages).
//!
//! ## Why this crate?
//!
//! PDF parsing and OCR are solved problems — pdfium reads documents,
//! tesseract reads pixels. What they don't solve is the decision pipeline
//! around them: which of a caller's candidate passwords unlocks a document,
//! whether the embedded text is real prose or font-map garbage, and when a
//! slow OCR pass is worth it. This crate owns exactly that pipeline and
//! keeps the collaborators behind narrow seams.
//!
//! ## Pipeline Overview
//!
//! ```text
//! base64 blob
//!  │
//!  ├─ 1. Decode        strict standard base64 → raw PDF bytes
//!  ├─ 2. Authenticate  open via pdfium, candidate passwords tried in order
//!  ├─ 3. Extract       native per-page text (fast path)
//!  ├─ 4. Judge         readable-character ratio vs threshold
//!  └─ 5. OCR fallback  rasterise at 300 DPI + tesseract, only if garbled
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2text::{extract_text, ExtractOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let encoded = std::fs::read_to_string("document.pdf.b64")?;
//!     let passwords = vec!["abc123".to_string()];
//!     let text = extract_text(&encoded, &passwords, &ExtractOptions::default()).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `pdf2text` binary (clap + anyhow + tracing-subscriber) |
//! | `server` | on      | Enables the axum HTTP service module |
//!
//! Disable both when using only the library:
//! ```toml
//! pdf2text = { version = "0.3", default-features = false }
//! ```
//!
//! ## Failure model
//!
//! Decode, open, and authentication failures abort with a typed
//! [`ExtractError`] naming the stage. OCR-path failures degrade: an
//! unavailable engine or a garbled OCR result falls back to the native text
//! (the caller asked for best-effort text, not guaranteed OCR), and a single
//! failed page becomes an inline placeholder rather than failing the call.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ExtractOptions, ExtractOptionsBuilder, DEFAULT_OCR_LANGUAGE, DEFAULT_READABLE_THRESHOLD,
};
pub use error::{ExtractError, OcrError};
pub use extract::{extract_bytes_blocking, extract_text, extract_text_blocking};
pub use pipeline::document::decrypt_pdf;
pub use pipeline::ocr::{OcrEngine, TesseractOcr, OCR_RENDER_SCALE};
pub use pipeline::validity::{judge, Verdict};
