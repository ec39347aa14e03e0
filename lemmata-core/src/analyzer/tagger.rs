//! Rule-based part-of-speech tagger.
//!
//! Tags tokenizer pieces left to right. Each word is looked up in the
//! [`Lexicon`] first; words it does not pin down fall through to suffix
//! heuristics, and the few genuinely ambiguous classes (`pay`, `work`,
//! `-ing` forms) are resolved from the one or two tags before them.
//! Unknown words default to NOUN, the most common open class in reviews.

use lemmata_types::PosTag;

use super::lexicon::{has_adjective_suffix, is_vowel, Lexicon};
use super::tokenizer::PieceKind;

/// Punctuation bytes tagged as symbols rather than punctuation.
const SYMBOLS: &[u8] = b"$%&+<=>@^|~#*";

#[inline]
fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(|b| is_vowel(b) || b == b'y')
}

/// Stem of an `-ing` form, when the remainder still looks like a word.
#[inline]
pub(crate) fn strip_ing(word: &str) -> Option<&str> {
    word.strip_suffix("ing")
        .filter(|stem| stem.len() >= 2 && has_vowel(stem))
}

/// Stem of an `-ed` form, when the remainder still looks like a word.
#[inline]
pub(crate) fn strip_ed(word: &str) -> Option<&str> {
    word.strip_suffix("ed")
        .filter(|stem| stem.len() >= 2 && has_vowel(stem))
}

/// What precedes the word being tagged.
#[derive(Clone, Copy)]
struct Context<'p> {
    prev: Option<(&'p str, PosTag)>,
    before_prev: Option<PosTag>,
}

impl Context<'_> {
    /// A determiner, adjective, number, possessive or preposition opens a noun slot.
    fn expects_noun(&self, lexicon: &Lexicon) -> bool {
        match self.prev {
            Some((word, PosTag::Pron)) => lexicon.is_possessive(word),
            Some((word, PosTag::Adp)) => word != "to",
            Some((_, PosTag::Det | PosTag::Adj | PosTag::Num)) => true,
            _ => false,
        }
    }

    /// A subject pronoun, auxiliary, negation, adverb or `to` opens a verb slot.
    fn expects_verb(&self, lexicon: &Lexicon) -> bool {
        match self.prev {
            Some(("to", _)) => true,
            Some((word, PosTag::Pron)) => !lexicon.is_possessive(word),
            Some((_, PosTag::Aux | PosTag::Part | PosTag::Adv)) => true,
            _ => false,
        }
    }

    fn prev_is_nominal(&self) -> bool {
        matches!(self.prev, Some((_, PosTag::Noun | PosTag::Propn)))
    }

    /// `terrible and demanding`: a word coordinated with an adjective.
    fn coordinated_with_adjective(&self) -> bool {
        matches!(self.prev, Some((_, PosTag::Cconj))) && self.before_prev == Some(PosTag::Adj)
    }
}

/// Part-of-speech tagger over a borrowed [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct Tagger<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> Tagger<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tags every piece; the result is parallel to `pieces`.
    pub fn tag(&self, pieces: &[(&str, PieceKind)]) -> Vec<PosTag> {
        let mut tags: Vec<PosTag> = Vec::with_capacity(pieces.len());

        for (i, &(text, kind)) in pieces.iter().enumerate() {
            let ctx = Context {
                prev: i.checked_sub(1).map(|j| (pieces[j].0, tags[j])),
                before_prev: i.checked_sub(2).map(|j| tags[j]),
            };
            tags.push(self.tag_piece(text, kind, ctx));
        }

        // Infinitival "to" is a particle, not an adposition.
        for i in 1..pieces.len() {
            if pieces[i - 1].0 == "to" && matches!(tags[i], PosTag::Verb | PosTag::Aux) {
                tags[i - 1] = PosTag::Part;
            }
        }

        tags
    }

    fn tag_piece(&self, text: &str, kind: PieceKind, ctx: Context<'_>) -> PosTag {
        match kind {
            PieceKind::Punct if text.bytes().all(|b| SYMBOLS.contains(&b)) => PosTag::Sym,
            PieceKind::Punct => PosTag::Punct,
            PieceKind::Clitic => self.tag_clitic(text, ctx),
            PieceKind::Word => self.tag_word(text, ctx),
        }
    }

    fn tag_clitic(&self, text: &str, ctx: Context<'_>) -> PosTag {
        match text {
            "n't" => PosTag::Part,
            // "it's" is a contracted verb, "company's" a possessive marker.
            "'s" => match ctx.prev {
                Some((word, PosTag::Pron)) if !self.lexicon.is_possessive(word) => PosTag::Aux,
                _ => PosTag::Part,
            },
            _ => PosTag::Aux,
        }
    }

    fn tag_word(&self, word: &str, ctx: Context<'_>) -> PosTag {
        let lex = self.lexicon;

        if word.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            return PosTag::Num;
        }

        if let Some(tag) = lex.closed_class(word) {
            if word == "like" && ctx.expects_verb(lex) {
                return PosTag::Verb;
            }
            return tag;
        }

        if lex.is_noun(word) {
            return PosTag::Noun;
        }

        if lex.irregular_adjective(word).is_some()
            || lex.is_adjective(word)
            || lex.adjective_base(word).is_some()
        {
            return PosTag::Adj;
        }

        if lex.is_adverb(word) {
            return PosTag::Adv;
        }

        if lex.irregular_verb(word).is_some() || lex.is_verb(word) {
            return PosTag::Verb;
        }

        if lex.is_noun_verb(word) {
            return if ctx.expects_noun(lex) {
                PosTag::Noun
            } else if ctx.expects_verb(lex) {
                PosTag::Verb
            } else {
                PosTag::Noun
            };
        }

        if let Some(base) = lex.verb_base_of_s_form(word) {
            if !lex.is_noun_verb(base) {
                return PosTag::Verb;
            }
            return if ctx.expects_noun(lex) {
                PosTag::Noun
            } else if ctx.prev_is_nominal() || ctx.expects_verb(lex) {
                PosTag::Verb
            } else {
                PosTag::Noun
            };
        }

        if strip_ing(word).is_some() {
            return match ctx.prev {
                _ if ctx.coordinated_with_adjective() => PosTag::Adj,
                Some((_, PosTag::Det | PosTag::Adj)) => PosTag::Noun,
                Some((w, PosTag::Pron)) if lex.is_possessive(w) => PosTag::Noun,
                _ => PosTag::Verb,
            };
        }

        if strip_ed(word).is_some() {
            return if ctx.coordinated_with_adjective() {
                PosTag::Adj
            } else {
                PosTag::Verb
            };
        }

        if word.len() > 4 && word.ends_with("ly") {
            return PosTag::Adv;
        }

        if has_adjective_suffix(word) {
            return PosTag::Adj;
        }

        PosTag::Noun
    }
}
