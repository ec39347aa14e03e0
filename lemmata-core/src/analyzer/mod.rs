//! Text analysis pipeline.
//!
//! This module provides the annotation components:
//! - **Normalizer**: lowercases and cleans raw review text
//! - **Tokenizer**: splits normalized text into words, punctuation and clitics
//! - **Tagger**: assigns Universal POS tags from a lexicon plus suffix rules
//! - **Lemmatizer**: reduces each tagged word to its base form
//! - **Annotator**: the seam the batch runner calls, and the rule-based default

pub mod annotator;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod tagger;
pub mod tokenizer;

pub use annotator::{Annotator, RuleAnnotator, MAX_TEXT_LENGTH};
pub use lemmatizer::Lemmatizer;
pub use lexicon::Lexicon;
pub use normalizer::{strip_punctuation, NormalizerConfig, TextNormalizer};
pub use tagger::Tagger;
pub use tokenizer::{PieceKind, Tokenizer};
