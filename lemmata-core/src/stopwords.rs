//! Stop words for review lemmas.
//!
//! The default set unions a curated list of review boilerplate ("great",
//! "company", "hour", contraction fragments) with [`ENGLISH`], the classic
//! 318-word English list. [`StopWords::nltk`] swaps the general list for
//! NLTK's shorter one from the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::analyzer::strip_punctuation;

/// General English stop words: function words, numerals and a few
/// filler verbs and nouns.
pub const ENGLISH: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
    "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
    "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
    "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
    "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in",
    "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
    "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
    "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some",
    "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Review-domain stop words.
///
/// Sentiment adjectives and workplace nouns that appear in nearly every
/// review and carry no topic. `'` and `-` strip to the empty string, which
/// keeps pure-punctuation lemmas out of the output.
pub const CURATED: &[&str] = &[
    "n't", "'s", "'m", "ca", "'", "'re", "i've", "poor", "-", "worst", "place", "make",
    "thing", "hour", "low", "high", "bos", "good", "great", "awesome", "excellent", "job",
    "best", "lot", "wonderful", "awful", "work", "amazing", "suck", "nice", "really", "free",
    "like", "love", "bad", "terrible", "care", "horrible", "company", "employee", "staff",
    "time", "day", "week", "month", "year", "need", "better", "just", "decent",
];

/// Normalizes a stop word the same way lemmas are compared.
#[inline]
fn normalize(word: &str) -> String {
    strip_punctuation(&word.to_lowercase()).to_owned()
}

/// Immutable set of lowercase, punctuation-stripped stop words.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    /// Curated review list plus [`ENGLISH`].
    pub fn english() -> Self {
        Self::from_words(CURATED.iter().chain(ENGLISH).copied())
    }

    /// Curated review list plus NLTK's English list.
    pub fn nltk() -> Self {
        let general = get(LANGUAGE::English);
        Self::from_words(CURATED.iter().copied().chain(general.iter().map(String::as_str)))
    }

    /// The curated review list alone.
    pub fn curated() -> Self {
        Self::from_words(CURATED.iter().copied())
    }

    /// Builds a set from arbitrary words, normalizing each on insertion.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            words: words.into_iter().map(normalize).collect(),
        }
    }

    /// True when `lemma` is a stop word. `lemma` must already be
    /// lowercase and punctuation-stripped.
    #[inline]
    pub fn contains(&self, lemma: &str) -> bool {
        self.words.contains(lemma)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_entries_are_normalized() {
        let sw = StopWords::curated();
        assert!(sw.contains("n't"));
        assert!(sw.contains("s"));
        assert!(sw.contains("m"));
        assert!(sw.contains("re"));
        assert!(sw.contains("i've"));
        assert!(sw.contains("bos"));
        assert!(!sw.contains("'s"));
    }

    #[test]
    fn bare_punctuation_makes_empty_string_a_member() {
        assert!(StopWords::curated().contains(""));
    }

    #[test]
    fn curated_does_not_cover_topic_words() {
        let sw = StopWords::curated();
        for word in ["pay", "demand", "boss", "benefit", "manager"] {
            assert!(!sw.contains(word), "{word}");
        }
    }

    #[test]
    fn english_includes_curated_and_general() {
        let sw = StopWords::english();
        assert!(sw.contains("great"));
        assert!(sw.contains("company"));
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(sw.len() > StopWords::curated().len());
    }

    #[test]
    fn english_list_size() {
        assert_eq!(ENGLISH.len(), 318);
        assert_eq!(StopWords::from_words(ENGLISH.iter().copied()).len(), 318);
    }

    #[test]
    fn english_keeps_ordinary_review_words() {
        let sw = StopWords::english();
        for word in [
            "problem", "help", "home", "open", "group", "order", "member", "new", "old", "big",
            "important", "useful", "manager", "benefit",
        ] {
            assert!(!sw.contains(word), "{word}");
        }
    }

    #[test]
    fn nltk_includes_curated_and_function_words() {
        let sw = StopWords::nltk();
        assert!(sw.contains("great"));
        assert!(sw.contains("the"));
        assert!(sw.contains("ourselves"));
        assert!(!sw.contains("problem"));
        assert!(!sw.contains("pay"));
    }

    #[test]
    fn from_words_lowercases_and_strips() {
        let sw = StopWords::from_words(["Hello!", "(World)"]);
        assert!(sw.contains("hello"));
        assert!(sw.contains("world"));
        assert_eq!(sw.len(), 2);
    }

    #[test]
    fn duplicates_collapse() {
        let sw = StopWords::from_words(["pay", "PAY", "pay."]);
        assert_eq!(sw.len(), 1);
        assert!(!sw.is_empty());
    }
}
