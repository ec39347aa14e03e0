//! Rule-based English lemmatizer.
//!
//! Lemmas depend on the tag: `meeting` stays `meeting` as a noun but becomes
//! `meet` as a verb. Irregular forms come from the [`Lexicon`]; regular forms
//! go through suffix rules with two spelling repairs on the recovered stem:
//!
//! - doubled final consonant is undoubled (`running` → `run`)
//! - a silent `e` is restored where English drops it (`hiring` → `hire`)
//!
//! Known verb bases always win over the repairs, so `adding` gives `add`
//! rather than `ad`.

use std::borrow::Cow;

use lemmata_types::PosTag;

use super::lexicon::{is_vowel, undouble, Lexicon};
use super::tagger::{strip_ed, strip_ing};

/// Endings whose `-es` plural or third-person form drops the whole `es`.
const ES_ENDINGS: [&str; 5] = ["ches", "shes", "sses", "xes", "zzes"];

/// Returns true when a stem recovered from `-ing`/`-ed` lost a silent `e`.
fn needs_silent_e(stem: &str) -> bool {
    let b = stem.as_bytes();
    let n = b.len();
    if n < 2 {
        return false;
    }
    let last = b[n - 1];
    let prev = b[n - 2];

    if matches!(last, b'v' | b'z' | b'u') {
        return true;
    }
    if last == b'c' && n >= 4 {
        return true;
    }
    if last == b'l' && matches!(prev, b'b' | b'p' | b't' | b'g' | b'd' | b'k' | b'z') {
        return true;
    }
    if n >= 4
        && (stem.ends_with("ar")
            || stem.ends_with("ir")
            || stem.ends_with("os")
            || stem.ends_with("us")
            || stem.ends_with("is")
            || stem.ends_with("ag")
            || stem.ends_with("dg")
            || stem.ends_with("rg"))
    {
        return true;
    }
    if n >= 5 && (stem.ends_with("at") || stem.ends_with("ang")) {
        return true;
    }

    // Short consonant-vowel-consonant stems: hir(e), lik(e), cod(e).
    if n == 3 && !is_vowel(b[0]) && is_vowel(b[1]) && !is_vowel(last) {
        return !matches!(last, b'w' | b'x' | b'y');
    }
    // Vowel-consonant stems: us(e).
    n == 2 && is_vowel(b[0]) && !is_vowel(last)
}

/// Tag-aware lemmatizer over a borrowed [`Lexicon`].
///
/// ```
/// use lemmata_core::analyzer::{Lemmatizer, Lexicon};
/// use lemmata_types::PosTag;
///
/// let lexicon = Lexicon::english();
/// let lemmatizer = Lemmatizer::new(&lexicon);
///
/// assert_eq!(lemmatizer.lemmatize("companies", PosTag::Noun), "company");
/// assert_eq!(lemmatizer.lemmatize("was", PosTag::Aux), "be");
/// assert_eq!(lemmatizer.lemmatize("demanding", PosTag::Adj), "demand");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lemmatizer<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> Lemmatizer<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    /// Returns the lemma of `word` under `pos`.
    pub fn lemmatize<'w>(&self, word: &'w str, pos: PosTag) -> Cow<'w, str> {
        match pos {
            PosTag::Verb | PosTag::Aux => self.verb(word),
            PosTag::Noun => self.noun(word),
            PosTag::Adj => self.adjective(word),
            PosTag::Adv => Cow::Borrowed(self.lexicon.irregular_adverb(word).unwrap_or(word)),
            PosTag::Pron => Cow::Borrowed(self.lexicon.object_pronoun(word).unwrap_or(word)),
            PosTag::Part if word == "n't" => Cow::Borrowed("not"),
            _ => Cow::Borrowed(word),
        }
    }

    fn verb<'w>(&self, word: &'w str) -> Cow<'w, str> {
        let lex = self.lexicon;

        if let Some(base) = lex.irregular_verb(word) {
            return Cow::Borrowed(base);
        }
        if lex.is_verb_base(word) {
            return Cow::Borrowed(word);
        }
        if let Some(stem) = strip_ing(word) {
            return self.repair_stem(stem);
        }
        if let Some(stem) = word.strip_suffix("ied").filter(|s| s.len() >= 2) {
            return Cow::Owned(format!("{stem}y"));
        }
        if word.ends_with("eed") {
            // agreed → agree, but proceed stays proceed.
            return match word.strip_suffix('d') {
                Some(base) if lex.is_verb_base(base) => Cow::Borrowed(base),
                _ => Cow::Borrowed(word),
            };
        }
        if let Some(stem) = strip_ed(word) {
            return self.repair_stem(stem);
        }
        if let Some(base) = lex.verb_base_of_s_form(word) {
            return Cow::Borrowed(base);
        }
        // echoes, vetoes; nouns keep the e (shoes, toes).
        if let Some(stem) = word.strip_suffix("oes").filter(|s| s.len() >= 2) {
            return Cow::Owned(format!("{stem}o"));
        }
        self.strip_plural_s(word)
    }

    fn noun<'w>(&self, word: &'w str) -> Cow<'w, str> {
        let lex = self.lexicon;

        if let Some(base) = lex.irregular_noun(word) {
            return Cow::Borrowed(base);
        }
        if word.len() <= 3 || lex.is_noun(word) {
            return Cow::Borrowed(word);
        }
        self.strip_plural_s(word)
    }

    fn adjective<'w>(&self, word: &'w str) -> Cow<'w, str> {
        let lex = self.lexicon;

        if let Some(base) = lex.irregular_adjective(word) {
            return Cow::Borrowed(base);
        }
        if lex.is_adjective(word) {
            return Cow::Borrowed(word);
        }
        if let Some(base) = lex.adjective_base(word) {
            return Cow::Owned(base);
        }
        // Participles used as adjectives take their verb's lemma.
        if strip_ing(word).is_some() || strip_ed(word).is_some() {
            return self.verb(word);
        }
        Cow::Borrowed(word)
    }

    /// Shared `-s`/`-es`/`-ies` rule for plural nouns and third-person verbs.
    fn strip_plural_s<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if word.len() <= 3 {
            return Cow::Borrowed(word);
        }
        if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() >= 2) {
            return Cow::Owned(format!("{stem}y"));
        }
        if ES_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return Cow::Borrowed(&word[..word.len() - 2]);
        }
        if ["ss", "us", "is"].iter().any(|e| word.ends_with(e)) {
            return Cow::Borrowed(word);
        }
        match word.strip_suffix('s') {
            Some(stem) => Cow::Borrowed(stem),
            None => Cow::Borrowed(word),
        }
    }

    fn repair_stem<'w>(&self, stem: &'w str) -> Cow<'w, str> {
        let lex = self.lexicon;

        if lex.is_verb_base(stem) {
            return Cow::Borrowed(stem);
        }
        let with_e = format!("{stem}e");
        if lex.is_verb_base(&with_e) {
            return Cow::Owned(with_e);
        }
        if let Some(single) = undouble(stem) {
            return Cow::Borrowed(single);
        }
        if needs_silent_e(stem) {
            return Cow::Owned(with_e);
        }
        Cow::Borrowed(stem)
    }
}
