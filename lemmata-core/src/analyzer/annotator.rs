//! The annotation seam and the built-in rule-based annotator.
//!
//! An [`Annotator`] turns raw text into an ordered sequence of [`Token`]s,
//! each carrying a lemma and a Universal POS tag. The batch runner creates
//! one annotator per worker and reuses it for every text that worker pulls,
//! so implementations may keep scratch buffers between calls.

use lemmata_types::{AnnotatorError, Token};

use super::lemmatizer::Lemmatizer;
use super::lexicon::Lexicon;
use super::normalizer::TextNormalizer;
use super::tagger::Tagger;
use super::tokenizer::{PieceKind, Tokenizer};

/// Maximum review length accepted by [`RuleAnnotator`], in bytes.
pub const MAX_TEXT_LENGTH: usize = 1_000_000;

/// Text → tokens with lemmas and POS tags.
pub trait Annotator {
    /// Annotates `text`, returning its tokens in order.
    fn annotate(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError>;
}

impl<A: Annotator + ?Sized> Annotator for &mut A {
    fn annotate(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
        (**self).annotate(text)
    }
}

impl<A: Annotator + ?Sized> Annotator for Box<A> {
    fn annotate(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
        (**self).annotate(text)
    }
}

/// Checks if input contains control characters other than whitespace.
fn contains_invalid_controls(input: &str) -> bool {
    input
        .bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F))
}

/// Rule-based English annotator.
///
/// Runs normalize → tokenize → tag → lemmatize. Token `text` is the
/// normalized (lowercased) surface form.
///
/// ```
/// use lemmata_core::analyzer::{Annotator, RuleAnnotator};
/// use lemmata_types::PosTag;
///
/// let mut annotator = RuleAnnotator::new();
/// let tokens = annotator.annotate("Hiring managers were great").unwrap();
///
/// let lemmas: Vec<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
/// assert_eq!(lemmas, ["hire", "manager", "be", "great"]);
/// assert_eq!(tokens[2].pos, PosTag::Aux);
/// ```
#[derive(Debug, Clone)]
pub struct RuleAnnotator {
    lexicon: Lexicon,
    normalizer: TextNormalizer,
    tokenizer: Tokenizer,
    norm_buf: String,
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleAnnotator {
    /// Builds an annotator with the English lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::english(),
            normalizer: TextNormalizer::default(),
            tokenizer: Tokenizer::new(),
            norm_buf: String::new(),
        }
    }

    /// Replaces the normalizer.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replaces the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    fn validate(text: &str) -> Result<(), AnnotatorError> {
        if text.len() > MAX_TEXT_LENGTH {
            return Err(AnnotatorError::TooLarge {
                size: text.len(),
                max_size: MAX_TEXT_LENGTH,
            });
        }
        if contains_invalid_controls(text) {
            return Err(AnnotatorError::InvalidInput {
                reason: "control characters (0x00-0x1F excluding whitespace) are not allowed",
            });
        }
        Ok(())
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
        Self::validate(text)?;

        self.normalizer.normalize_into(text, &mut self.norm_buf);

        let mut pieces: Vec<(&str, PieceKind)> = Vec::new();
        self.tokenizer
            .tokenize(&self.norm_buf, |piece, kind, _| pieces.push((piece, kind)));

        let tags = Tagger::new(&self.lexicon).tag(&pieces);
        let lemmatizer = Lemmatizer::new(&self.lexicon);

        Ok(pieces
            .iter()
            .zip(tags)
            .map(|(&(piece, _), pos)| Token::new(piece, lemmatizer.lemmatize(piece, pos), pos))
            .collect())
    }
}
