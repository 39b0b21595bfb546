//! End-to-end tests for pdf2text.
//!
//! These tests open real documents through pdfium, so they need a pdfium
//! shared library at runtime. They are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly
//! requested.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture
//!
//! The documents themselves are assembled in-process (see `minimal_pdf`)
//! except for the encrypted case, which uses a checked-in RC4-40 fixture
//! locked with the user password `abc123`.

use image::DynamicImage;
use pdf2text::{
    extract_bytes_blocking, ExtractError, ExtractOptions, OcrEngine, OcrError,
};
use std::path::PathBuf;
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip the test unless E2E_ENABLED is set.
macro_rules! e2e_skip_unless_enabled {
    () => {
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    };
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn encrypted_fixture() -> Vec<u8> {
    let path = fixtures_dir().join("encrypted_abc123.pdf");
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {e}", path.display()))
}

/// Assemble a well-formed single-font PDF with one content stream per page.
/// Object offsets are computed while writing, so the xref table is exact.
fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    let n = pages.len();
    let font_obj = 3 + 2 * n;

    let kids: Vec<String> = (0..n).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();
    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), n),
    ];

    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 24 Tf 72 712 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >>",
            4 + 2 * i,
            font_obj
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_pos = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for off in &offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_pos
        )
        .as_bytes(),
    );

    out
}

fn pw(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// OCR stub: always answers with the same canned result.
struct StubOcr(Result<String, OcrError>);

impl OcrEngine for StubOcr {
    fn recognize(&self, _image: &DynamicImage, _language: &str) -> Result<String, OcrError> {
        self.0.clone()
    }
}

fn options_with_stub(force_ocr: bool, outcome: Result<String, OcrError>) -> ExtractOptions {
    ExtractOptions::builder()
        .force_ocr(force_ocr)
        .ocr_engine(Arc::new(StubOcr(outcome)))
        .build()
}

// ── Native extraction ────────────────────────────────────────────────────────

#[test]
fn hello_world_single_page() {
    e2e_skip_unless_enabled!();

    let bytes = minimal_pdf(&["Hello World"]);
    let text = extract_bytes_blocking(&bytes, &[], &ExtractOptions::default())
        .expect("extraction should succeed");

    assert!(text.contains("Hello World"), "got: {text:?}");
}

#[test]
fn unprotected_document_succeeds_regardless_of_password_list() {
    e2e_skip_unless_enabled!();

    let bytes = minimal_pdf(&["Hello World"]);
    let text = extract_bytes_blocking(&bytes, &pw(&["bogus", "entries"]), &ExtractOptions::default())
        .expect("password list must be ignored for unprotected documents");

    assert!(text.contains("Hello World"));
}

#[test]
fn three_pages_come_out_in_page_order() {
    e2e_skip_unless_enabled!();

    let bytes = minimal_pdf(&["AlphaPage", "BravoPage", "CharliePage"]);
    let text = extract_bytes_blocking(&bytes, &[], &ExtractOptions::default()).unwrap();

    let a = text.find("AlphaPage").expect("page 1 text missing");
    let b = text.find("BravoPage").expect("page 2 text missing");
    let c = text.find("CharliePage").expect("page 3 text missing");
    assert!(a < b && b < c, "page order not preserved: {text:?}");
}

#[test]
fn garbage_bytes_fail_with_open_error() {
    e2e_skip_unless_enabled!();

    let err = extract_bytes_blocking(b"this is not a pdf at all", &[], &ExtractOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExtractError::Open { .. }), "got: {err:?}");
}

// ── Password handling ────────────────────────────────────────────────────────

#[test]
fn encrypted_document_unlocks_with_correct_password_later_in_list() {
    e2e_skip_unless_enabled!();

    let bytes = encrypted_fixture();
    let text = extract_bytes_blocking(&bytes, &pw(&["x", "abc123"]), &ExtractOptions::default())
        .expect("second candidate should unlock the document");

    assert!(text.contains("Top Secret Content"), "got: {text:?}");
}

#[test]
fn encrypted_document_rejects_all_wrong_passwords() {
    e2e_skip_unless_enabled!();

    let bytes = encrypted_fixture();
    let err = extract_bytes_blocking(&bytes, &pw(&["x", "y"]), &ExtractOptions::default())
        .unwrap_err();

    assert!(matches!(err, ExtractError::Authentication { tried: 2 }), "got: {err:?}");
    assert!(err.to_string().contains("password"));
}

#[test]
fn encrypted_document_with_empty_password_list_fails() {
    e2e_skip_unless_enabled!();

    let bytes = encrypted_fixture();
    let err = extract_bytes_blocking(&bytes, &[], &ExtractOptions::default()).unwrap_err();

    assert!(matches!(err, ExtractError::Authentication { tried: 0 }), "got: {err:?}");
}

// ── OCR routing ──────────────────────────────────────────────────────────────

#[test]
fn forced_ocr_returns_engine_output_without_judging() {
    e2e_skip_unless_enabled!();

    // Native text would be perfectly readable; forced OCR must ignore it and
    // return the engine's (unreadable-by-ratio) output unconditionally.
    let bytes = minimal_pdf(&["Hello World"]);
    let canned = "\u{E000}\u{E001}\u{E002}".to_string();
    let options = options_with_stub(true, Ok(canned.clone()));

    let text = extract_bytes_blocking(&bytes, &[], &options).unwrap();
    assert_eq!(text, canned);
}

#[test]
fn forced_ocr_surfaces_unavailable_engine() {
    e2e_skip_unless_enabled!();

    let bytes = minimal_pdf(&["Hello World"]);
    let options = options_with_stub(true, Err(OcrError::Unavailable("engine gone".into())));

    let err = extract_bytes_blocking(&bytes, &[], &options).unwrap_err();
    assert!(matches!(err, ExtractError::OcrUnavailable { .. }), "got: {err:?}");
}

#[test]
fn readable_native_text_never_invokes_ocr() {
    e2e_skip_unless_enabled!();

    // An engine that would explode if called: readable native text must
    // short-circuit before OCR.
    let bytes = minimal_pdf(&["Hello World, a perfectly ordinary page."]);
    let options = options_with_stub(false, Err(OcrError::Unavailable("must not be called".into())));

    let text = extract_bytes_blocking(&bytes, &[], &options).unwrap();
    assert!(text.contains("Hello World"));
}

#[test]
fn garbled_native_with_failing_ocr_returns_native_text() {
    e2e_skip_unless_enabled!();

    // \247 is the section sign in the standard font encoding — outside the
    // readable class, so a page of them is judged garbled.
    let garbled_page = r"\247\247\247\247\247\247\247\247\247\247";
    let bytes = minimal_pdf(&[garbled_page]);

    // Threshold 0 accepts anything: this run bypasses OCR and captures the
    // native text verbatim.
    let native = extract_bytes_blocking(
        &bytes,
        &[],
        &ExtractOptions::builder().readable_threshold(0.0).build(),
    )
    .unwrap();

    // Default threshold plus an unavailable engine: must degrade to the
    // same native text instead of raising.
    let options = options_with_stub(false, Err(OcrError::Unavailable("no tesseract".into())));
    let text = extract_bytes_blocking(&bytes, &[], &options).unwrap();

    assert_eq!(text, native);
}

#[test]
fn garbled_native_with_readable_ocr_returns_ocr_text() {
    e2e_skip_unless_enabled!();

    let garbled_page = r"\247\247\247\247\247\247\247\247\247\247";
    let bytes = minimal_pdf(&[garbled_page]);

    let options = options_with_stub(false, Ok("Recognised by the scanner instead.".into()));
    let text = extract_bytes_blocking(&bytes, &[], &options).unwrap();

    assert_eq!(text, "Recognised by the scanner instead.");
}
