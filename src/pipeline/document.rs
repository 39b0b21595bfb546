//! Document opening, password authentication, and native text extraction.
//!
//! ## Password model
//!
//! pdfium takes the password at load time rather than exposing a separate
//! `authenticate()` call on an open handle. The ordered candidate trial is
//! therefore: load once with no password, and only when that load fails with
//! a password-classified error, reload per candidate until one is accepted.
//! A document that needs no password opens on the first attempt and the
//! candidate list is never consulted.
//!
//! ## Handle lifetime
//!
//! `PdfDocument` closes its native handle on drop, so holding the document in
//! one scope gives release on every exit path — success, error return, or
//! unwinding — without an explicit close call.

use crate::error::ExtractError;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Open `bytes` as a PDF document, trying `passwords` in list order if the
/// document is encrypted. First accepted password wins; the rest are never
/// tried.
///
/// # Errors
/// * [`ExtractError::Open`] — the bytes are not a parseable document.
/// * [`ExtractError::Authentication`] — the document is encrypted and every
///   candidate (or an empty list) was rejected.
pub fn open_and_authenticate<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    passwords: &[String],
) -> Result<PdfDocument<'a>, ExtractError> {
    authenticate_with(passwords, |password| {
        pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| {
                if is_password_error(&e) {
                    OpenFailure::PasswordRejected
                } else {
                    OpenFailure::Malformed(format!("{e:?}"))
                }
            })
    })
}

/// Outcome of a single open attempt, as classified by the loader closure.
#[derive(Debug)]
pub(crate) enum OpenFailure {
    /// The document wants a password (or rejected the one supplied).
    PasswordRejected,
    /// The document cannot be parsed at all.
    Malformed(String),
}

/// The ordered candidate trial, factored out of pdfium so its semantics are
/// unit-testable: `try_open(None)` first, then each candidate in order,
/// stopping at the first success.
pub(crate) fn authenticate_with<T>(
    passwords: &[String],
    mut try_open: impl FnMut(Option<&str>) -> Result<T, OpenFailure>,
) -> Result<T, ExtractError> {
    match try_open(None) {
        Ok(document) => {
            debug!("document opened without a password");
            return Ok(document);
        }
        Err(OpenFailure::Malformed(detail)) => return Err(ExtractError::Open { detail }),
        Err(OpenFailure::PasswordRejected) => {
            debug!("document is encrypted, trying {} candidate(s)", passwords.len());
        }
    }

    for (idx, password) in passwords.iter().enumerate() {
        match try_open(Some(password)) {
            Ok(document) => {
                info!("password candidate {} of {} accepted", idx + 1, passwords.len());
                return Ok(document);
            }
            Err(OpenFailure::PasswordRejected) => continue,
            Err(OpenFailure::Malformed(detail)) => return Err(ExtractError::Open { detail }),
        }
    }

    Err(ExtractError::Authentication {
        tried: passwords.len(),
    })
}

/// Extract embedded text from every page, in page order, joined with `"\n"`.
///
/// A page whose text objects cannot be read contributes an empty string so
/// the output keeps one entry per page.
pub fn native_text(document: &PdfDocument<'_>) -> String {
    let pages = document.pages();
    let mut parts: Vec<String> = Vec::with_capacity(pages.len() as usize);

    for (idx, page) in pages.iter().enumerate() {
        match page.text() {
            Ok(text) => parts.push(text.all()),
            Err(e) => {
                warn!("page {}: native text unavailable: {:?}", idx + 1, e);
                parts.push(String::new());
            }
        }
    }

    parts.join("\n")
}

/// Unlock an encrypted PDF with a known user password and re-save it without
/// protection. An unencrypted input is re-saved as-is with a warning.
///
/// Saving a copy through pdfium writes no encryption dictionary, which also
/// drops any owner-password restrictions on the original.
pub fn decrypt_pdf(input: &Path, output: &Path, password: &str) -> Result<(), ExtractError> {
    let pdfium = Pdfium::default();

    let document = match pdfium.load_pdf_from_file(input, None) {
        Ok(document) => {
            warn!("'{}' is not encrypted; saving an unmodified copy", input.display());
            document
        }
        Err(e) if is_password_error(&e) => pdfium
            .load_pdf_from_file(input, Some(password))
            .map_err(|e| {
                if is_password_error(&e) {
                    ExtractError::Authentication { tried: 1 }
                } else {
                    ExtractError::Open {
                        detail: format!("{e:?}"),
                    }
                }
            })?,
        Err(e) => {
            return Err(ExtractError::Open {
                detail: format!("{e:?}"),
            })
        }
    };

    document
        .save_to_file(output)
        .map_err(|e| ExtractError::Save {
            path: output.to_path_buf(),
            detail: format!("{e:?}"),
        })?;

    info!("decrypted copy saved to '{}'", output.display());
    Ok(())
}

/// pdfium reports a password problem as an internal error whose debug
/// rendering names the password; there is no dedicated variant to match on
/// across pdfium releases.
fn is_password_error(err: &PdfiumError) -> bool {
    let detail = format!("{err:?}");
    detail.contains("Password") || detail.contains("password")
}
