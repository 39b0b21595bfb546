//! Configuration types for text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractOptions`], built
//! via its [`ExtractOptionsBuilder`]. Keeping every knob in one struct makes
//! it trivial to share options across threads and to log exactly which
//! settings produced a given output.

use crate::pipeline::ocr::OcrEngine;
use std::fmt;
use std::sync::Arc;

/// OCR language profile covering Traditional Chinese, Simplified Chinese and
/// English — the document mix this service was built for. The string is a
/// tesseract `-l` argument; any other combination of installed language packs
/// works the same way (e.g. `"deu+eng"`).
pub const DEFAULT_OCR_LANGUAGE: &str = "chi_tra+chi_sim+eng";

/// Default readability threshold for the text-validity judge.
///
/// Deliberately permissive: a false "readable" just skips OCR and returns the
/// native text, which is cheap; a false "garbled" triggers a full OCR pass,
/// which is the most expensive thing this crate can do.
pub const DEFAULT_READABLE_THRESHOLD: f32 = 0.3;

/// Options for one extraction call.
///
/// Built via [`ExtractOptions::builder()`] or using
/// [`ExtractOptions::default()`].
///
/// # Example
/// ```rust
/// use pdf2text::ExtractOptions;
///
/// let options = ExtractOptions::builder()
///     .force_ocr(true)
///     .ocr_language("eng")
///     .build();
/// ```
#[derive(Clone)]
pub struct ExtractOptions {
    /// Skip native extraction entirely and OCR every page. Default: false.
    ///
    /// With forced OCR the result is returned unconditionally — the validity
    /// judge is not consulted, and an unavailable OCR engine is a hard error
    /// instead of a silent fallback.
    pub force_ocr: bool,

    /// Language profile handed to the OCR engine. Default:
    /// [`DEFAULT_OCR_LANGUAGE`].
    pub ocr_language: String,

    /// Readability threshold for the validity judge, in `0.0..=1.0`.
    /// Default: [`DEFAULT_READABLE_THRESHOLD`].
    pub readable_threshold: f32,

    /// Pre-constructed OCR engine. If `None`, the bundled tesseract
    /// subprocess engine is used. Injecting an engine here is how tests (and
    /// callers with an in-process OCR stack) replace the collaborator.
    pub ocr_engine: Option<Arc<dyn OcrEngine>>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            force_ocr: false,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            readable_threshold: DEFAULT_READABLE_THRESHOLD,
            ocr_engine: None,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("force_ocr", &self.force_ocr)
            .field("ocr_language", &self.ocr_language)
            .field("readable_threshold", &self.readable_threshold)
            .field("ocr_engine", &self.ocr_engine.as_ref().map(|_| "<dyn OcrEngine>"))
            .finish()
    }
}

impl ExtractOptions {
    /// Create a new builder for `ExtractOptions`.
    pub fn builder() -> ExtractOptionsBuilder {
        ExtractOptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`ExtractOptions`].
#[derive(Debug)]
pub struct ExtractOptionsBuilder {
    options: ExtractOptions,
}

impl ExtractOptionsBuilder {
    pub fn force_ocr(mut self, v: bool) -> Self {
        self.options.force_ocr = v;
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.options.ocr_language = lang.into();
        self
    }

    pub fn readable_threshold(mut self, t: f32) -> Self {
        self.options.readable_threshold = t.clamp(0.0, 1.0);
        self
    }

    pub fn ocr_engine(mut self, engine: Arc<dyn OcrEngine>) -> Self {
        self.options.ocr_engine = Some(engine);
        self
    }

    /// Build the options. All setters clamp rather than error, so this is
    /// infallible.
    pub fn build(self) -> ExtractOptions {
        self.options
    }
}
