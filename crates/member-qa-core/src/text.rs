//! Tokenization and the word lists that drive it.
//!
//! Two distinct stopword lists exist:
//!
//! - [`ENGLISH_STOP_WORDS`] filters features inside the TF-IDF index.
//! - [`Vocabulary::stopwords`] filters the token sets used by the name
//!   resolver and the topic filter. It also drops document field labels
//!   (`message`, `timestamp`, `id`, ...).
//!
//! The domain list and the synonym groups are content, not algorithm, so
//! [`Vocabulary`] can be replaced from configuration.

use std::collections::HashSet;

/// Standard English stopword list applied at the index feature level.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Default domain stopwords for overlap checks.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "is", "am", "are", "was", "were",
    "be", "been", "being", "to", "of", "in", "on", "at", "for", "with", "by", "from", "as", "it",
    "this", "that", "these", "those", "do", "does", "did", "doing", "have", "has", "had",
    "having", "i", "you", "he", "she", "we", "they", "them", "him", "her", "my", "your", "his",
    "their", "our", "me", "us", "what", "when", "where", "why", "how", "many", "much", "please",
    "can", "could", "would", "should", "member", "user", "message", "timestamp", "id",
    "user_id",
];

/// Default synonym groups: vehicles, dining, travel.
pub const DEFAULT_TOPIC_GROUPS: &[&[&str]] = &[
    &["car", "cars", "vehicle", "vehicles", "garage", "truck", "suv", "sedan"],
    &[
        "restaurant", "restaurants", "dinner", "lunch", "brunch", "cafe", "bistro", "eat", "food",
        "dining", "table", "reservation",
    ],
    &["trip", "travel", "flight", "vacation", "holiday", "london", "journey"],
];

/// Split `text` into lowercase word tokens.
///
/// A word is a maximal run of alphanumeric characters or `_`.
pub fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Domain stopwords plus topic synonym groups.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub stopwords: HashSet<String>,
    pub topic_groups: Vec<HashSet<String>>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_STOPWORDS.iter().map(|s| s.to_string()),
            DEFAULT_TOPIC_GROUPS
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect()),
        )
    }
}

impl Vocabulary {
    /// Build a vocabulary from arbitrary word lists. Entries are lowercased.
    pub fn new<S, G>(stopwords: S, topic_groups: G) -> Self
    where
        S: IntoIterator<Item = String>,
        G: IntoIterator<Item = Vec<String>>,
    {
        Self {
            stopwords: stopwords.into_iter().map(|s| s.to_lowercase()).collect(),
            topic_groups: topic_groups
                .into_iter()
                .map(|g| g.into_iter().map(|s| s.to_lowercase()).collect())
                .collect(),
        }
    }

    /// Lowercase word tokens of `text` with domain stopwords removed.
    pub fn tokenize(&self, text: &str) -> HashSet<String> {
        word_tokens(text)
            .filter(|t| !self.stopwords.contains(t))
            .collect()
    }
}
