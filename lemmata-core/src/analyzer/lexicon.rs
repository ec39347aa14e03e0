//! English word lists for the rule-based annotator.
//!
//! The lists are tuned for employee reviews: closed word classes are close to
//! complete, open classes only hold words the suffix heuristics get wrong or
//! that are frequent enough in reviews to be worth pinning.

use lemmata_types::PosTag;
use rustc_hash::{FxHashMap, FxHashSet};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "these", "those", "each", "every", "some", "any", "no", "another",
    "all", "both", "either", "neither", "such", "what", "which", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whoever", "whatever", "something", "anything", "nothing", "everything", "someone", "anyone",
    "everyone", "nobody", "somebody", "anybody", "everybody", "none", "that", "there",
];

/// Pronouns that modify a following noun.
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "though", "while", "whereas", "unless", "since", "whether",
    "than", "until", "as", "when", "where", "why", "how",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down", "out",
    "off", "over", "under", "around", "among", "across", "along", "within", "without", "via",
    "per", "like", "toward", "towards", "upon", "despite", "beyond", "behind", "near", "onto",
    "inside", "outside", "throughout", "except",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "ca", "wo",
];

const PARTICLES: &[&str] = &["not"];

const INTERJECTIONS: &[&str] = &[
    "oh", "wow", "yes", "yeah", "hey", "ok", "okay", "please", "thanks", "lol",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "twenty",
    "hundred", "thousand", "million",
];

const ADJECTIVES: &[&str] = &[
    "good", "great", "bad", "nice", "new", "old", "big", "small", "high", "low", "long", "short",
    "few", "many", "other", "same", "different", "own", "poor", "easy", "hard", "difficult",
    "free", "decent", "awesome", "excellent", "amazing", "terrible", "horrible", "awful",
    "wonderful", "friendly", "flexible", "competitive", "fair", "unfair", "fun", "happy", "busy",
    "stressful", "toxic", "helpful", "supportive", "smart", "young", "little", "large", "senior",
    "junior", "full", "main", "fast", "slow", "quick", "strong", "weak", "open", "clear", "real",
    "important", "possible", "able", "entire", "whole", "certain", "cheap", "expensive", "rich",
    "safe", "dirty", "clean", "boring", "tough", "rude", "lazy", "fine", "cool", "solid",
    "stable", "average", "mediocre", "sure", "right", "wrong", "hot", "cold", "late", "daily",
    "weekly", "monthly", "yearly", "lovely", "likely", "costly", "lonely", "ugly", "silly",
    "elderly", "positive", "negative", "professional", "personal", "social", "corporate",
    "local", "national", "global", "internal", "external", "public", "private", "typical",
    "normal", "regular", "extra", "outstanding", "fantastic", "incredible", "pleasant",
    "unpleasant", "kind", "mean", "nasty", "generous", "current", "best", "worst", "top",
    "remote", "hybrid", "unpaid", "bright", "tight",
];

const ADVERBS: &[&str] = &[
    "very", "really", "just", "too", "also", "so", "quite", "always", "never", "often",
    "sometimes", "usually", "again", "still", "even", "only", "ever", "here", "now", "then",
    "well", "much", "more", "most", "less", "least", "rather", "pretty", "almost", "already",
    "soon", "however", "otherwise", "overall", "definitely", "extremely", "highly",
    "especially", "generally", "probably", "maybe", "perhaps", "actually", "literally",
    "constantly", "frequently", "rarely", "seldom", "mostly", "fairly", "truly", "basically",
    "simply", "certainly", "absolutely", "completely", "totally", "somewhat", "else", "away",
    "back", "together", "instead", "early", "far", "enough", "anyway", "once", "twice",
];

/// Verbs that are rarely nouns.
const VERBS: &[&str] = &[
    "get", "make", "go", "take", "give", "know", "think", "feel", "keep", "let", "learn", "grow",
    "leave", "lose", "find", "come", "become", "see", "say", "tell", "ask", "try", "fire",
    "manage", "treat", "expect", "provide", "allow", "receive", "require", "seem", "appear",
    "stay", "bring", "buy", "build", "send", "spend", "begin", "hold", "meet", "promote",
    "improve", "include", "create", "enjoy", "recommend", "understand", "listen", "talk", "hear",
    "follow", "want", "add", "agree", "decide", "believe", "consider", "continue", "develop",
    "handle", "encourage", "compensate", "sit", "stand", "win", "pick", "quit", "complain",
    "suck", "micromanage", "put", "drive",
];

/// Words that are as often nouns as verbs; context decides.
const NOUN_VERBS: &[&str] = &[
    "pay", "work", "need", "care", "love", "hate", "help", "change", "support", "benefit",
    "experience", "offer", "schedule", "plan", "train", "lead", "travel", "review", "start",
    "end", "demand", "balance", "cost", "raise", "value", "focus", "report", "stress",
    "lack", "increase", "request", "process", "call", "set", "cut", "drop", "stop", "run",
    "use", "deal", "hire", "move",
];

/// Nouns the suffix heuristics would otherwise mistag.
const NOUNS: &[&str] = &[
    "family", "supply", "assembly", "proposal", "approval", "rental", "hospital", "animal",
    "signal", "journal", "interval", "terminal", "potential", "criminal", "salary", "people",
    "news", "series", "business", "thing", "morning", "evening", "building", "meeting",
    "training", "feeling", "opening", "ceiling", "wedding", "clothing", "holiday", "team",
    "manager", "management", "culture", "environment", "place", "time", "boss", "owner",
    "customer", "worker", "employer", "number", "career", "order", "paper", "water", "center",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("'m", "be"), ("'re", "be"), ("has", "have"), ("had", "have"),
    ("having", "have"), ("'ve", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
    ("doing", "do"), ("ca", "can"), ("wo", "will"), ("'ll", "will"), ("'d", "would"),
    ("went", "go"), ("gone", "go"), ("goes", "go"), ("going", "go"), ("got", "get"),
    ("gotten", "get"), ("made", "make"), ("paid", "pay"), ("left", "leave"), ("took", "take"),
    ("taken", "take"), ("gave", "give"), ("given", "give"), ("told", "tell"), ("said", "say"),
    ("felt", "feel"), ("kept", "keep"), ("thought", "think"), ("brought", "bring"),
    ("bought", "buy"), ("found", "find"), ("came", "come"), ("became", "become"),
    ("ran", "run"), ("saw", "see"), ("seen", "see"), ("knew", "know"), ("known", "know"),
    ("began", "begin"), ("begun", "begin"), ("held", "hold"), ("met", "meet"), ("sent", "send"),
    ("spent", "spend"), ("built", "build"), ("lost", "lose"), ("led", "lead"), ("grew", "grow"),
    ("grown", "grow"), ("fell", "fall"), ("fallen", "fall"), ("wrote", "write"),
    ("written", "write"), ("ate", "eat"), ("eaten", "eat"), ("chose", "choose"),
    ("chosen", "choose"), ("spoke", "speak"), ("spoken", "speak"), ("understood", "understand"),
    ("taught", "teach"), ("caught", "catch"), ("fought", "fight"), ("sold", "sell"),
    ("stood", "stand"), ("sat", "sit"), ("won", "win"), ("hung", "hang"), ("hid", "hide"),
    ("hidden", "hide"), ("forgot", "forget"), ("forgotten", "forget"), ("broke", "break"),
    ("broken", "break"), ("drove", "drive"), ("driven", "drive"), ("wore", "wear"),
    ("worn", "wear"), ("threw", "throw"), ("thrown", "throw"), ("flew", "fly"),
    ("flown", "fly"), ("drew", "draw"), ("drawn", "draw"), ("shook", "shake"),
    ("meant", "mean"), ("dealt", "deal"), ("heard", "hear"), ("laid", "lay"), ("'s", "be"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
    ("teeth", "tooth"), ("mice", "mouse"), ("lives", "life"), ("wives", "wife"),
    ("knives", "knife"), ("halves", "half"), ("shelves", "shelf"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
];

const IRREGULAR_ADVERBS: &[(&str, &str)] = &[("better", "well"), ("best", "well")];

const OBJECT_PRONOUNS: &[(&str, &str)] = &[
    ("me", "i"), ("us", "we"), ("him", "he"), ("them", "they"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ic", "ical", "ish",
];

fn set(words: &[&'static str]) -> FxHashSet<&'static str> {
    words.iter().copied().collect()
}

fn map(pairs: &[(&'static str, &'static str)]) -> FxHashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

/// Lookup tables for tagging and lemmatization.
///
/// Building a lexicon hashes every list once; annotators hold one for their
/// whole lifetime.
#[derive(Debug, Clone)]
pub struct Lexicon {
    closed: FxHashMap<&'static str, PosTag>,
    possessives: FxHashSet<&'static str>,
    adjectives: FxHashSet<&'static str>,
    adverbs: FxHashSet<&'static str>,
    verbs: FxHashSet<&'static str>,
    noun_verbs: FxHashSet<&'static str>,
    nouns: FxHashSet<&'static str>,
    irregular_verbs: FxHashMap<&'static str, &'static str>,
    irregular_nouns: FxHashMap<&'static str, &'static str>,
    irregular_adjectives: FxHashMap<&'static str, &'static str>,
    irregular_adverbs: FxHashMap<&'static str, &'static str>,
    object_pronouns: FxHashMap<&'static str, &'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    /// Builds the English lexicon.
    pub fn english() -> Self {
        let mut closed = FxHashMap::default();
        // Later lists win: "that" ends up PRON, "like" ADP, "one" NUM.
        for (words, tag) in [
            (DETERMINERS, PosTag::Det),
            (SUBORDINATORS, PosTag::Sconj),
            (ADPOSITIONS, PosTag::Adp),
            (PRONOUNS, PosTag::Pron),
            (CONJUNCTIONS, PosTag::Cconj),
            (AUXILIARIES, PosTag::Aux),
            (PARTICLES, PosTag::Part),
            (INTERJECTIONS, PosTag::Intj),
            (NUMBER_WORDS, PosTag::Num),
        ] {
            for &word in words {
                closed.insert(word, tag);
            }
        }

        Self {
            closed,
            possessives: set(POSSESSIVES),
            adjectives: set(ADJECTIVES),
            adverbs: set(ADVERBS),
            verbs: set(VERBS),
            noun_verbs: set(NOUN_VERBS),
            nouns: set(NOUNS),
            irregular_verbs: map(IRREGULAR_VERBS),
            irregular_nouns: map(IRREGULAR_NOUNS),
            irregular_adjectives: map(IRREGULAR_ADJECTIVES),
            irregular_adverbs: map(IRREGULAR_ADVERBS),
            object_pronouns: map(OBJECT_PRONOUNS),
        }
    }

    /// Tag of a closed-class word.
    #[inline]
    pub fn closed_class(&self, word: &str) -> Option<PosTag> {
        self.closed.get(word).copied()
    }

    #[inline]
    pub fn is_possessive(&self, word: &str) -> bool {
        self.possessives.contains(word)
    }

    #[inline]
    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    #[inline]
    pub fn is_adverb(&self, word: &str) -> bool {
        self.adverbs.contains(word)
    }

    #[inline]
    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(word)
    }

    /// True for verbs that are rarely nouns.
    #[inline]
    pub fn is_verb(&self, word: &str) -> bool {
        self.verbs.contains(word)
    }

    /// True for base forms that are as often nouns as verbs.
    #[inline]
    pub fn is_noun_verb(&self, word: &str) -> bool {
        self.noun_verbs.contains(word)
    }

    /// True for any base form known to work as a verb.
    #[inline]
    pub fn is_verb_base(&self, word: &str) -> bool {
        self.verbs.contains(word) || self.noun_verbs.contains(word)
    }

    #[inline]
    pub fn irregular_verb(&self, word: &str) -> Option<&'static str> {
        self.irregular_verbs.get(word).copied()
    }

    #[inline]
    pub fn irregular_noun(&self, word: &str) -> Option<&'static str> {
        self.irregular_nouns.get(word).copied()
    }

    #[inline]
    pub fn irregular_adjective(&self, word: &str) -> Option<&'static str> {
        self.irregular_adjectives.get(word).copied()
    }

    #[inline]
    pub fn irregular_adverb(&self, word: &str) -> Option<&'static str> {
        self.irregular_adverbs.get(word).copied()
    }

    #[inline]
    pub fn object_pronoun(&self, word: &str) -> Option<&'static str> {
        self.object_pronouns.get(word).copied()
    }

    /// Base adjective of a regular comparative or superlative.
    ///
    /// `higher` → `high`, `nicest` → `nice`, `bigger` → `big`,
    /// `busier` → `busy`. Only bases in the adjective list are recognized.
    pub fn adjective_base(&self, word: &str) -> Option<String> {
        let stem = word
            .strip_suffix("est")
            .or_else(|| word.strip_suffix("er"))?;
        if stem.len() < 2 {
            return None;
        }

        let mut candidates: Vec<String> = vec![stem.to_owned(), format!("{stem}e")];
        if let Some(base) = stem.strip_suffix('i') {
            candidates.push(format!("{base}y"));
        }
        if let Some(single) = undouble(stem) {
            candidates.push(single.to_owned());
        }

        candidates.into_iter().find(|c| self.adjectives.contains(c.as_str()))
    }

    /// Verb base of a regular `-s` form whose base is in the lexicon.
    pub fn verb_base_of_s_form<'w>(&self, word: &'w str) -> Option<&'w str> {
        let stem = word.strip_suffix('s')?;
        if word.ends_with("ss") || stem.is_empty() {
            return None;
        }
        if self.is_verb_base(stem) {
            return Some(stem);
        }
        let stem = word.strip_suffix("es")?;
        self.is_verb_base(stem).then_some(stem)
    }
}

/// True when `word` ends in one of the common adjective-forming suffixes.
pub fn has_adjective_suffix(word: &str) -> bool {
    (word.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)))
        || (word.len() > 6 && word.ends_with("al"))
}

#[inline]
pub(crate) fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Returns the stem minus its last letter when it ends in a doubled consonant
/// that English doubles before a suffix (`runn` → `run`, `stopp` → `stop`).
/// `ll`, `ss`, `zz` and `ff` are real word endings and are left alone.
pub(crate) fn undouble(stem: &str) -> Option<&str> {
    let b = stem.as_bytes();
    if b.len() < 3 {
        return None;
    }
    let (x, y) = (b[b.len() - 2], b[b.len() - 1]);
    if x == y && y.is_ascii_alphabetic() && !is_vowel(y) && !matches!(y, b'l' | b's' | b'z' | b'f')
    {
        Some(&stem[..stem.len() - 1])
    } else {
        None
    }
}
