//! Pipeline stages for PDF text extraction.
//!
//! Each submodule implements exactly one responsibility. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different OCR engine) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! decode ──▶ document ──▶ {native text | ocr} ──▶ validity
//! (base64)   (pdfium +     (page loop)            (readable?)
//!             passwords)
//! ```
//!
//! 1. [`decode`]   — base64 string → raw PDF bytes
//! 2. [`document`] — open the bytes via pdfium, trying candidate passwords
//!    in order when the document is encrypted; also hosts native per-page
//!    text extraction and the decrypt-and-resave helper
//! 3. [`ocr`]      — rasterise pages at a fixed scale and hand them to the
//!    OCR engine; the only stage that spawns a subprocess
//! 4. [`validity`] — judge whether extracted text is readable or garbled
//!
//! The decision logic wiring these stages together lives in
//! [`crate::extract`].

pub mod decode;
pub mod document;
pub mod ocr;
pub mod validity;
