//! Text normalization ahead of tokenization.
//!
//! Review text arrives in whatever shape the scraper produced: mixed case,
//! runs of newlines and tabs, curly apostrophes from word processors. The
//! normalizer turns it into the canonical form the tokenizer expects:
//!
//! - lowercase (Unicode-aware)
//! - every whitespace run collapsed to a single ASCII space
//! - no leading or trailing whitespace
//! - typographic apostrophes folded to `'` so clitics split consistently

#[inline(always)]
const fn is_typographic_apostrophe(c: char) -> bool {
    matches!(c, '\u{2018}' | '\u{2019}' | '\u{02BC}' | '\u{FF07}')
}

/// Strips leading and trailing ASCII punctuation.
///
/// The stripped set is `` !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~ ``. Interior
/// punctuation is left alone, so `"n't"` and `"i've"` survive unchanged.
#[inline]
pub fn strip_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizerConfig {
    /// When enabled, folds curly and full-width apostrophes to `'`.
    pub fold_apostrophes: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fold_apostrophes: true,
        }
    }
}

/// Lowercasing, whitespace-collapsing normalizer.
///
/// # Examples
///
/// ```
/// use lemmata_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  The PAY\n\tis  fine "), "the pay is fine");
/// assert_eq!(normalizer.normalize("Don\u{2019}t"), "don't");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer first and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        if input.is_ascii() {
            self.normalize_ascii(input.as_bytes(), out);
            return;
        }

        let mut pending_space = false;
        for ch in input.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }

            if ch.is_ascii() {
                out.push(ch.to_ascii_lowercase());
            } else if self.config.fold_apostrophes && is_typographic_apostrophe(ch) {
                out.push('\'');
            } else {
                out.extend(ch.to_lowercase());
            }
        }
    }

    fn normalize_ascii(&self, bytes: &[u8], out: &mut String) {
        let mut pending_space = false;
        for &b in bytes {
            if b.is_ascii_whitespace() || b == 0x0B {
                pending_space = !out.is_empty();
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(b.to_ascii_lowercase() as char);
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}
