//! Core types shared across the Lemmata workspace.
//!
//! This crate holds the small, dependency-free vocabulary that the analyzer,
//! the lemma filter and the record pipeline all speak:
//!
//! - **Part-of-speech tags**: the Universal POS tagset, packed into one byte
//! - **Tag sets**: a bit set over tags for constant-time membership checks
//! - **Tokens**: the annotator's output unit (surface text, lemma, tag)
//! - **Labels**: the two known review polarities
//! - **Annotator errors**: why a text could not be annotated

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

/// Universal part-of-speech tag.
///
/// `#[repr(u8)]` keeps the tag one byte wide and gives every variant a stable
/// bit position inside [`PosSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PosTag {
    /// Adjective
    Adj = 0,
    /// Adposition (prepositions and postpositions)
    Adp = 1,
    /// Adverb
    Adv = 2,
    /// Auxiliary verb
    Aux = 3,
    /// Coordinating conjunction
    Cconj = 4,
    /// Determiner
    Det = 5,
    /// Interjection
    Intj = 6,
    /// Noun
    Noun = 7,
    /// Numeral
    Num = 8,
    /// Particle
    Part = 9,
    /// Pronoun
    Pron = 10,
    /// Proper noun
    Propn = 11,
    /// Punctuation
    Punct = 12,
    /// Subordinating conjunction
    Sconj = 13,
    /// Symbol
    Sym = 14,
    /// Verb
    Verb = 15,
    /// Other
    X = 16,
    /// Whitespace
    Space = 17,
}

impl PosTag {
    /// Every tag, in discriminant order.
    pub const ALL: [PosTag; 18] = [
        PosTag::Adj,
        PosTag::Adp,
        PosTag::Adv,
        PosTag::Aux,
        PosTag::Cconj,
        PosTag::Det,
        PosTag::Intj,
        PosTag::Noun,
        PosTag::Num,
        PosTag::Part,
        PosTag::Pron,
        PosTag::Propn,
        PosTag::Punct,
        PosTag::Sconj,
        PosTag::Sym,
        PosTag::Verb,
        PosTag::X,
        PosTag::Space,
    ];

    /// The conventional upper-case tag name (`"NOUN"`, `"ADJ"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
            PosTag::Space => "SPACE",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown part-of-speech tag: {:?}", self.0)
    }
}

impl core::error::Error for UnknownTag {}

impl FromStr for PosTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}

/// A set of [`PosTag`]s packed into a single `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PosSet(u32);

impl PosSet {
    /// The empty set.
    pub const EMPTY: PosSet = PosSet(0);

    /// The word classes kept in lemmatized review text:
    /// adjective, adposition, adverb, noun and verb.
    pub const CONTENT: PosSet = PosSet::EMPTY
        .with(PosTag::Adj)
        .with(PosTag::Adp)
        .with(PosTag::Adv)
        .with(PosTag::Noun)
        .with(PosTag::Verb);

    /// Returns a copy of this set that also contains `tag`.
    #[must_use]
    #[inline(always)]
    pub const fn with(self, tag: PosTag) -> Self {
        Self(self.0 | (1 << tag as u32))
    }

    /// Membership test.
    #[inline(always)]
    pub const fn contains(self, tag: PosTag) -> bool {
        self.0 & (1 << tag as u32) != 0
    }

    /// Number of tags in the set.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no tag is in the set.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the member tags in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = PosTag> {
        PosTag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }
}

impl FromIterator<PosTag> for PosSet {
    fn from_iter<I: IntoIterator<Item = PosTag>>(iter: I) -> Self {
        iter.into_iter().fold(PosSet::EMPTY, PosSet::with)
    }
}

/// One annotated token.
///
/// The annotator emits tokens in text order. `lemma` is the base form used
/// for filtering; `text` is the surface form as it appeared after
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Base form
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
}

impl Token {
    /// Creates a new token.
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.text, self.lemma, self.pos)
    }
}

/// Review polarity.
///
/// Only the exact strings `"pro"` and `"con"` are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Positive review section
    Pro,
    /// Negative review section
    Con,
}

impl Label {
    /// Parses a raw label value. Matching is exact and case-sensitive.
    #[inline]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pro" => Some(Label::Pro),
            "con" => Some(Label::Con),
            _ => None,
        }
    }

    /// The raw label value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Label::Pro => "pro",
            Label::Con => "con",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors an annotator can report for a single text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotatorError {
    /// Text exceeds the annotator's maximum input size.
    TooLarge {
        /// The actual size of the text in bytes.
        size: usize,
        /// The maximum allowed size in bytes.
        max_size: usize,
    },
    /// Text contains content the annotator cannot process.
    InvalidInput {
        /// Description of the invalid content.
        reason: &'static str,
    },
    /// The annotator could not be initialized or is no longer usable.
    Unavailable {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl fmt::Display for AnnotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotatorError::TooLarge { size, max_size } => {
                write!(
                    f,
                    "text too large to annotate: {} bytes (max: {} bytes)",
                    size, max_size
                )
            }
            AnnotatorError::InvalidInput { reason } => {
                write!(f, "text cannot be annotated: {}", reason)
            }
            AnnotatorError::Unavailable { reason } => {
                write!(f, "annotator unavailable: {}", reason)
            }
        }
    }
}

impl core::error::Error for AnnotatorError {}
