//! OCR fallback: rasterise pages via pdfium and hand them to a recognition
//! engine.
//!
//! ## Why a trait seam?
//!
//! Recognition is the one collaborator this crate shells out for, and the one
//! callers most often want to replace — with an in-process engine, a remote
//! service, or a stub in tests. [`OcrEngine`] keeps that boundary to a single
//! method; everything else (rasterisation, the per-page loop, placeholder
//! policy) is pipeline-owned and engine-agnostic.
//!
//! ## Why a fixed render scale?
//!
//! PDF page geometry is defined at 72 DPI. Rendering at 300 DPI effective
//! resolution is the long-standing sweet spot for tesseract-class engines:
//! below ~200 DPI small CJK glyphs lose strokes, above ~400 DPI memory and
//! recognition time grow with no accuracy gain. The scale is a design
//! constant, not a user knob.

use crate::error::OcrError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, warn};

/// Rasterisation scale-up applied before recognition: 72 DPI page space
/// rendered at 300 DPI effective resolution.
pub const OCR_RENDER_SCALE: f32 = 300.0 / 72.0;

/// A text-recognition engine fed one page image at a time.
///
/// `language` is an engine-specific profile string; for the bundled
/// [`TesseractOcr`] it is a tesseract `-l` argument such as
/// `"chi_tra+chi_sim+eng"`.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError>;
}

/// OCR engine backed by the `tesseract` command-line binary.
///
/// Each page image is written to a temporary PNG and recognised with
/// `tesseract <png> stdout -l <language>`. A missing binary is
/// [`OcrError::Unavailable`]; a failed recognition run is
/// [`OcrError::Recognition`].
#[derive(Debug, Default)]
pub struct TesseractOcr;

impl TesseractOcr {
    pub fn new() -> Self {
        Self
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError> {
        let dir = tempfile::tempdir()
            .map_err(|e| OcrError::Recognition(format!("temp dir creation failed: {e}")))?;
        let png_path = dir.path().join("page.png");

        image
            .save_with_format(&png_path, image::ImageFormat::Png)
            .map_err(|e| OcrError::Recognition(format!("PNG encoding failed: {e}")))?;

        let output = Command::new("tesseract")
            .arg(&png_path)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("--dpi")
            .arg("300")
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    OcrError::Unavailable("tesseract binary not found on PATH".into())
                } else {
                    OcrError::Unavailable(format!("failed to spawn tesseract: {e}"))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // Tesseract occasionally emits NULs on malformed glyph clusters.
        Ok(String::from_utf8_lossy(&output.stdout)
            .replace('\u{0}', "")
            .trim_end()
            .to_string())
    }
}

/// Rasterise one page at the fixed OCR scale.
pub fn rasterize_page(page: &PdfPage<'_>) -> Result<DynamicImage, OcrError> {
    // Page geometry is in 72-DPI points; scaling the pixel width by the
    // fixed factor yields the 300-DPI effective render. Height follows
    // proportionally.
    let target_width = (page.width().value * OCR_RENDER_SCALE).round().max(1.0) as i32;
    let render_config = PdfRenderConfig::new().set_target_width(target_width);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| OcrError::Recognition(format!("rasterisation failed: {e:?}")))?;

    let image = bitmap.as_image();
    debug!("rasterised page → {}x{} px", image.width(), image.height());
    Ok(image)
}

/// Recognise every page of `document` in page order, joined with `"\n"`.
///
/// A failed recognition run costs only its own page: the page's text becomes
/// a diagnostic placeholder and the loop continues. An unavailable engine
/// aborts the whole pass — there is no point rasterising further pages for
/// an engine that cannot run.
pub fn ocr_document(
    document: &PdfDocument<'_>,
    engine: &dyn OcrEngine,
    language: &str,
) -> Result<String, OcrError> {
    let pages = document.pages();
    let mut parts: Vec<String> = Vec::with_capacity(pages.len() as usize);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        let recognized =
            rasterize_page(&page).and_then(|image| engine.recognize(&image, language));

        match recognized {
            Ok(text) => {
                debug!("page {page_num}: OCR produced {} chars", text.chars().count());
                parts.push(text);
            }
            Err(OcrError::Unavailable(detail)) => return Err(OcrError::Unavailable(detail)),
            Err(OcrError::Recognition(detail)) => {
                warn!("page {page_num}: OCR failed, inserting placeholder: {detail}");
                parts.push(ocr_failure_placeholder(page_num, &detail));
            }
        }
    }

    Ok(parts.join("\n"))
}

/// Inline placeholder for a page whose recognition failed. Kept as plain
/// text inside the output so partial results stay usable.
pub(crate) fn ocr_failure_placeholder(page_num: usize, detail: &str) -> String {
    format!("[OCR failed on page {page_num}: {detail}]")
}
