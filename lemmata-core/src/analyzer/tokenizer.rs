//! Streaming word tokenizer.
//!
//! Splits normalized review text into word, punctuation and clitic pieces
//! and hands each one to a callback together with its position:
//!
//! ```ignore
//! "the pay isn't great."
//! ("the", Word, 0) ("pay", Word, 1) ("is", Word, 2) ("n't", Clitic, 3)
//! ("great", Word, 4) (".", Punct, 5)
//! ```
//!
//! ## Splitting rules
//!
//! 1. Space-delimited chunks are found with a `memchr` scan for ASCII space.
//! 2. A chunk made only of ASCII punctuation is a single punctuation piece.
//! 3. Otherwise leading and trailing punctuation runs become their own pieces.
//! 4. English clitics are split off the word: `n't`, `'s`, `'m`, `'re`, `'ve`,
//!    `'ll`, `'d`. `can't` becomes `ca` + `n't` and `won't` becomes `wo` + `n't`.
//!
//! Pieces are slices of the input; nothing is allocated.
//!
//! ## The Input Contract
//!
//! Input must come from [`TextNormalizer`](super::TextNormalizer): lowercase,
//! no leading or trailing whitespace, single spaces between chunks. Debug
//! builds assert the whitespace part of the contract.

use memchr::memchr_iter;

/// Clitic suffixes split off the end of a word, checked in order.
const CLITICS: [&str; 7] = ["n't", "'s", "'m", "'re", "'ve", "'ll", "'d"];

/// What kind of piece the tokenizer emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// A word or number
    Word = 0,
    /// A run of ASCII punctuation
    Punct = 1,
    /// A clitic split off the preceding word
    Clitic = 2,
}

/// Streaming tokenizer over normalized text.
///
/// ```
/// use lemmata_core::analyzer::{PieceKind, Tokenizer};
///
/// let mut pieces = Vec::new();
/// Tokenizer::new().tokenize("can't stop.", |text, kind, _| pieces.push((text, kind)));
///
/// assert_eq!(
///     pieces,
///     vec![
///         ("ca", PieceKind::Word),
///         ("n't", PieceKind::Clitic),
///         ("stop", PieceKind::Word),
///         (".", PieceKind::Punct),
///     ]
/// );
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Tokenizer {
    split_clitics: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer that splits clitics.
    #[inline]
    pub const fn new() -> Self {
        Self {
            split_clitics: true,
        }
    }

    /// Creates a tokenizer that leaves clitics attached to their word.
    #[inline]
    pub const fn without_clitics() -> Self {
        Self {
            split_clitics: false,
        }
    }

    /// Tokenizes normalized input and emits `(text, kind, position)`.
    ///
    /// Position is `u32`. After emitting a piece at position `u32::MAX`,
    /// further emissions stop.
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, PieceKind, u32),
    {
        let bytes = normalized.as_bytes();

        debug_assert!(
            bytes.first().is_none_or(|&b| b != b' '),
            "tokenizer: leading whitespace, normalizer contract violated"
        );
        debug_assert!(
            bytes.last().is_none_or(|&b| b != b' '),
            "tokenizer: trailing whitespace, normalizer contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut pos = 0u32;
        let mut done = false;
        let mut push = |text: &'n str, kind: PieceKind| {
            if done {
                return;
            }
            emit(text, kind, pos);
            if pos == u32::MAX {
                done = true;
            } else {
                pos += 1;
            }
        };

        let mut start = 0usize;
        for i in memchr_iter(b' ', bytes) {
            if start < i {
                self.split_chunk(&normalized[start..i], &mut push);
            }
            start = i + 1;
        }
        if start < bytes.len() {
            self.split_chunk(&normalized[start..], &mut push);
        }
    }

    fn split_chunk<'n, F>(&self, chunk: &'n str, push: &mut F)
    where
        F: FnMut(&'n str, PieceKind),
    {
        let bytes = chunk.as_bytes();
        let lead = bytes.iter().take_while(|b| b.is_ascii_punctuation()).count();
        if lead == bytes.len() {
            push(chunk, PieceKind::Punct);
            return;
        }
        let trail = bytes
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_punctuation())
            .count();

        // Both cut points sit next to ASCII bytes, so they are char boundaries.
        let (head, rest) = chunk.split_at(lead);
        let (word, tail) = rest.split_at(rest.len() - trail);

        if !head.is_empty() {
            push(head, PieceKind::Punct);
        }
        self.split_word(word, push);
        if !tail.is_empty() {
            push(tail, PieceKind::Punct);
        }
    }

    fn split_word<'n, F>(&self, word: &'n str, push: &mut F)
    where
        F: FnMut(&'n str, PieceKind),
    {
        if self.split_clitics {
            for clitic in CLITICS {
                if word.len() > clitic.len() && word.ends_with(clitic) {
                    let (stem, suffix) = word.split_at(word.len() - clitic.len());
                    push(stem, PieceKind::Word);
                    push(suffix, PieceKind::Clitic);
                    return;
                }
            }
        }
        push(word, PieceKind::Word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(&str, PieceKind, u32)> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text, kind, pos| out.push((text, kind, pos)));
        out
    }

    fn texts(input: &str) -> Vec<&str> {
        collect(input).into_iter().map(|(t, _, _)| t).collect()
    }

    #[test]
    fn piece_kind_size_is_1_byte() {
        assert_eq!(size_of::<PieceKind>(), 1);
    }

    #[test]
    fn single_word() {
        let out = collect("hello");
        assert_eq!(out, vec![("hello", PieceKind::Word, 0)]);
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn positions_are_sequential() {
        let out = collect("the pay, is great.");
        for (i, (_, _, pos)) in out.iter().enumerate() {
            assert_eq!(*pos, i as u32);
        }
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn trailing_punctuation_split() {
        assert_eq!(texts("great pay."), vec!["great", "pay", "."]);
        assert_eq!(texts("wow!!!"), vec!["wow", "!!!"]);
    }

    #[test]
    fn leading_punctuation_split() {
        assert_eq!(texts("(optional) perks"), vec!["(", "optional", ")", "perks"]);
    }

    #[test]
    fn punctuation_only_chunk() {
        let out = collect("good - bad");
        assert_eq!(out[1], ("-", PieceKind::Punct, 1));
        assert_eq!(texts("..."), vec!["..."]);
    }

    #[test]
    fn interior_punctuation_kept() {
        assert_eq!(texts("work-life balance"), vec!["work-life", "balance"]);
        assert_eq!(texts("9.5/10"), vec!["9.5/10"]);
    }

    #[test]
    fn negation_clitics() {
        assert_eq!(texts("don't"), vec!["do", "n't"]);
        assert_eq!(texts("can't"), vec!["ca", "n't"]);
        assert_eq!(texts("won't"), vec!["wo", "n't"]);
        assert_eq!(texts("isn't"), vec!["is", "n't"]);
    }

    #[test]
    fn other_clitics() {
        assert_eq!(texts("it's"), vec!["it", "'s"]);
        assert_eq!(texts("i'm"), vec!["i", "'m"]);
        assert_eq!(texts("they're"), vec!["they", "'re"]);
        assert_eq!(texts("i've"), vec!["i", "'ve"]);
        assert_eq!(texts("we'll"), vec!["we", "'ll"]);
        assert_eq!(texts("you'd"), vec!["you", "'d"]);
    }

    #[test]
    fn clitic_kind_is_reported() {
        let out = collect("company's");
        assert_eq!(out[0], ("company", PieceKind::Word, 0));
        assert_eq!(out[1], ("'s", PieceKind::Clitic, 1));
    }

    #[test]
    fn clitic_with_trailing_punctuation() {
        assert_eq!(texts("it's,"), vec!["it", "'s", ","]);
    }

    #[test]
    fn bare_clitic_is_not_split_further() {
        assert_eq!(texts("n't"), vec!["n't"]);
        let out = collect("'s");
        assert_eq!(out, vec![("'", PieceKind::Punct, 0), ("s", PieceKind::Word, 1)]);
    }

    #[test]
    fn clitics_can_be_left_attached() {
        let mut out = Vec::new();
        Tokenizer::without_clitics().tokenize("don't stop", |t, _, _| out.push(t));
        assert_eq!(out, vec!["don't", "stop"]);
    }

    #[test]
    fn unicode_words_are_single_pieces() {
        assert_eq!(texts("café très bien!"), vec!["café", "très", "bien", "!"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello, world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::new().tokenize(&input, |text, _, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn tokenizer_is_reusable() {
        let t = Tokenizer::new();

        let mut n = 0usize;
        t.tokenize("hello world", |_, _, _| n += 1);
        assert_eq!(n, 2);

        n = 0;
        t.tokenize("one, two three", |_, _, _| n += 1);
        assert_eq!(n, 4);
    }
}
