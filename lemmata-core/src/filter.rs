//! Reduces one review to its space-joined content lemmas.

use lemmata_types::{AnnotatorError, PosSet, Token};
use smallvec::SmallVec;

use crate::analyzer::{strip_punctuation, Annotator};
use crate::stopwords::StopWords;

/// Appends `to` once per token whose stripped lemma is `from`.
///
/// Corrections are applied after the regular lemmas and regardless of
/// whether the token itself was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LemmaCorrection {
    pub from: &'static str,
    pub to: &'static str,
}

/// Lemma the annotator produces for `boss` often enough to need repair.
pub const BOSS: LemmaCorrection = LemmaCorrection {
    from: "bos",
    to: "boss",
};

/// The text → lemmatized text policy shared by every worker.
///
/// ```
/// use lemmata_core::{LemmaFilter, StopWords};
/// use lemmata_core::analyzer::RuleAnnotator;
/// use lemmata_types::PosSet;
///
/// let filter = LemmaFilter::new(StopWords::curated(), PosSet::CONTENT);
/// let mut annotator = RuleAnnotator::new();
///
/// let text = "The pay is great but my bos was terrible and demanding.";
/// assert_eq!(filter.filter(&mut annotator, text).unwrap(), "pay demand boss");
/// ```
#[derive(Debug, Clone)]
pub struct LemmaFilter {
    stop_words: StopWords,
    allowed: PosSet,
    corrections: Vec<LemmaCorrection>,
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new(StopWords::english(), PosSet::CONTENT)
    }
}

impl LemmaFilter {
    /// Creates a filter with the `bos` → `boss` correction.
    pub fn new(stop_words: StopWords, allowed: PosSet) -> Self {
        Self {
            stop_words,
            allowed,
            corrections: vec![BOSS],
        }
    }

    /// Replaces the correction table.
    pub fn with_corrections(mut self, corrections: Vec<LemmaCorrection>) -> Self {
        self.corrections = corrections;
        self
    }

    /// Stop words this filter drops.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Tags whose lemmas are kept.
    pub fn allowed(&self) -> PosSet {
        self.allowed
    }

    /// Annotates `text` and filters its tokens.
    ///
    /// # Errors
    ///
    /// Returns the annotator's error unchanged.
    pub fn filter<A>(&self, annotator: &mut A, text: &str) -> Result<String, AnnotatorError>
    where
        A: Annotator + ?Sized,
    {
        let tokens = annotator.annotate(text)?;
        Ok(self.filter_tokens(&tokens))
    }

    /// Filters already-annotated tokens.
    pub fn filter_tokens(&self, tokens: &[Token]) -> String {
        let mut kept: SmallVec<[&str; 32]> = SmallVec::new();
        let mut appended: SmallVec<[&str; 4]> = SmallVec::new();

        for token in tokens {
            let lemma = strip_punctuation(&token.lemma);
            if self.allowed.contains(token.pos) && !self.stop_words.contains(lemma) {
                kept.push(lemma);
            }
            for correction in &self.corrections {
                if lemma == correction.from {
                    appended.push(correction.to);
                }
            }
        }

        kept.extend(appended);
        kept.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemmata_types::PosTag;

    /// Returns canned tokens regardless of input.
    struct Scripted(Vec<Token>);

    impl Annotator for Scripted {
        fn annotate(&mut self, _text: &str) -> Result<Vec<Token>, AnnotatorError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl Annotator for Failing {
        fn annotate(&mut self, _text: &str) -> Result<Vec<Token>, AnnotatorError> {
            Err(AnnotatorError::Unavailable {
                reason: "model not loaded".into(),
            })
        }
    }

    fn tok(lemma: &str, pos: PosTag) -> Token {
        Token::new(lemma, lemma, pos)
    }

    fn curated() -> LemmaFilter {
        LemmaFilter::new(StopWords::curated(), PosSet::CONTENT)
    }

    #[test]
    fn keeps_only_allowed_tags() {
        let tokens = [
            tok("pay", PosTag::Noun),
            tok("the", PosTag::Det),
            tok("manage", PosTag::Verb),
            tok("we", PosTag::Pron),
            tok("remote", PosTag::Adj),
            tok("quickly", PosTag::Adv),
            tok("in", PosTag::Adp),
            tok("be", PosTag::Aux),
            tok("2", PosTag::Num),
        ];
        assert_eq!(
            curated().filter_tokens(&tokens),
            "pay manage remote quickly in"
        );
    }

    #[test]
    fn drops_stop_words() {
        let tokens = [
            tok("great", PosTag::Adj),
            tok("culture", PosTag::Noun),
            tok("company", PosTag::Noun),
        ];
        assert_eq!(curated().filter_tokens(&tokens), "culture");
    }

    #[test]
    fn stop_word_check_uses_stripped_lemma() {
        let tokens = [tok("great!", PosTag::Adj), tok("(pay)", PosTag::Noun)];
        assert_eq!(curated().filter_tokens(&tokens), "pay");
    }

    #[test]
    fn pure_punctuation_lemmas_never_produce_empty_entries() {
        let tokens = [
            tok("pay", PosTag::Noun),
            tok("--", PosTag::Noun),
            tok("benefit", PosTag::Noun),
        ];
        assert_eq!(curated().filter_tokens(&tokens), "pay benefit");
    }

    #[test]
    fn boss_appended_after_regular_lemmas() {
        let tokens = [
            tok("bos", PosTag::Noun),
            tok("pay", PosTag::Noun),
            tok("demand", PosTag::Adj),
        ];
        assert_eq!(curated().filter_tokens(&tokens), "pay demand boss");
    }

    #[test]
    fn one_boss_per_occurrence_regardless_of_tag() {
        let tokens = [
            tok("bos", PosTag::Noun),
            tok("bos.", PosTag::Punct),
            tok("bos", PosTag::Propn),
        ];
        assert_eq!(curated().filter_tokens(&tokens), "boss boss boss");
    }

    #[test]
    fn correct_spelling_is_left_alone() {
        let tokens = [tok("boss", PosTag::Noun)];
        assert_eq!(curated().filter_tokens(&tokens), "boss");
    }

    #[test]
    fn corrections_can_be_replaced() {
        let filter = curated().with_corrections(vec![LemmaCorrection {
            from: "mgr",
            to: "manager",
        }]);
        let tokens = [tok("bos", PosTag::Noun), tok("mgr", PosTag::Noun)];
        assert_eq!(filter.filter_tokens(&tokens), "mgr manager");
    }

    #[test]
    fn empty_tokens_give_empty_string() {
        assert_eq!(curated().filter_tokens(&[]), "");
    }

    #[test]
    fn filter_empty_text_is_empty() {
        let mut annotator = crate::analyzer::RuleAnnotator::new();
        assert_eq!(LemmaFilter::default().filter(&mut annotator, "").unwrap(), "");
    }

    #[test]
    fn filter_uses_annotator_output() {
        let mut annotator = Scripted(vec![tok("pay", PosTag::Noun), tok("bos", PosTag::Noun)]);
        assert_eq!(
            curated().filter(&mut annotator, "ignored").unwrap(),
            "pay boss"
        );
    }

    #[test]
    fn annotator_errors_propagate() {
        let err = curated().filter(&mut Failing, "anything").unwrap_err();
        assert!(matches!(err, AnnotatorError::Unavailable { .. }));
    }

    #[test]
    fn output_never_contains_stop_words() {
        let filter = LemmaFilter::default();
        let mut annotator = crate::analyzer::RuleAnnotator::new();
        let out = filter
            .filter(
                &mut annotator,
                "Great people, I love the work-life balance but management doesn't care!",
            )
            .unwrap();
        for lemma in out.split(' ').filter(|l| !l.is_empty()) {
            assert!(!filter.stop_words().contains(lemma), "{lemma} in {out:?}");
        }
    }

    #[test]
    fn default_filter_keeps_content_words() {
        let filter = LemmaFilter::default();
        assert_eq!(filter.allowed(), PosSet::CONTENT);

        let mut annotator = crate::analyzer::RuleAnnotator::new();
        let out = filter
            .filter(&mut annotator, "The problem is the new system")
            .unwrap();
        assert_eq!(out, "problem new");
    }

    #[test]
    fn default_filter_gives_review_lemmas() {
        let mut annotator = crate::analyzer::RuleAnnotator::new();
        let out = LemmaFilter::default()
            .filter(
                &mut annotator,
                "The pay is great but my bos was terrible and demanding.",
            )
            .unwrap();
        assert_eq!(out, "pay demand boss");
    }

    #[test]
    fn review_scenario_with_curated_list() {
        let mut annotator = crate::analyzer::RuleAnnotator::new();
        let out = curated()
            .filter(
                &mut annotator,
                "The pay is great but my bos was terrible and demanding.",
            )
            .unwrap();
        assert_eq!(out, "pay demand boss");
    }
}
