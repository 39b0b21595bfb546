//! Text-validity judge: is an extraction result readable prose or garbage?
//!
//! ## Why a character-class ratio?
//!
//! Garbled text from a broken font-encoding map collapses into characters
//! outside any script a reader would expect: private-use-area glyphs,
//! U+FFFD replacement characters, symbol noise. Genuine text — even mixed
//! Chinese/English with numbers and punctuation — stays overwhelmingly inside
//! a small set of Unicode ranges. Counting the share of "readable" characters
//! separates the two without a language model: broken pages typically score
//! far below 0.3 while real prose scores above 0.9, so the threshold has a
//! wide safe band.

/// Outcome of a readability judgement: the verdict plus the ratio that
/// produced it, kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Whether the text passed the threshold.
    pub readable: bool,
    /// Share of readable characters in the whitespace-stripped text,
    /// in `0.0..=1.0`.
    pub ratio: f32,
}

/// Judge whether `text` reads as real text at the given threshold.
///
/// * Empty input → not readable: the extraction produced nothing usable.
/// * Non-empty input that is all whitespace → readable: a legitimately blank
///   page is not garbage, and must not trigger an OCR pass.
/// * Otherwise the whitespace-stripped character sequence is scored and the
///   verdict is `ratio >= threshold`.
pub fn judge(text: &str, threshold: f32) -> Verdict {
    if text.is_empty() {
        return Verdict {
            readable: false,
            ratio: 0.0,
        };
    }

    let stripped: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Verdict {
            readable: true,
            ratio: 1.0,
        };
    }

    let readable_count = stripped.iter().filter(|&&c| is_readable_char(c)).count();
    let ratio = readable_count as f32 / stripped.len() as f32;

    Verdict {
        readable: ratio >= threshold,
        ratio,
    }
}

/// The readable character class: CJK ideographs, CJK punctuation, ASCII
/// letters and digits, common punctuation, and their full-width variants.
fn is_readable_char(c: char) -> bool {
    match c {
        // CJK Unified Ideographs + Extension A
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => true,
        // CJK symbols and punctuation (、。「」…)
        '\u{3000}'..='\u{303F}' => true,
        // Full-width ASCII variants (！？：；（）etc.)
        '\u{FF01}'..='\u{FF5E}' => true,
        // ASCII letters and digits
        'a'..='z' | 'A'..='Z' | '0'..='9' => true,
        // Common punctuation seen in extracted prose
        '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '(' | ')' | '[' | ']' | '{' | '}'
        | '-' | '_' | '/' | '\\' | '@' | '#' | '$' | '%' | '&' | '*' | '+' | '=' | '<' | '>' => {
            true
        }
        _ => false,
    }
}
