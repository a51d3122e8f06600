//! Text analysis: tokenization and English stop words

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// English stop words removed by the vectorizer when stop-word filtering is on.
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
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Check whether a token is an English stop word
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Split text into tokens, lowercasing first when requested
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    TOKEN_PATTERN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenize and optionally drop stop words
pub(crate) fn analyze(text: &str, lowercase: bool, stop_words: bool) -> Vec<String> {
    let mut tokens = tokenize(text, lowercase);
    if stop_words {
        tokens.retain(|t| !is_stop_word(t));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = tokenize("A pipe is leaking, water everywhere!", true);
        assert_eq!(tokens, vec!["pipe", "is", "leaking", "water", "everywhere"]);
    }

    #[test]
    fn test_tokenize_keeps_case_when_asked() {
        let tokens = tokenize("Street Light", false);
        assert_eq!(tokens, vec!["Street", "Light"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let tokens = tokenize("Café près du pont", true);
        assert_eq!(tokens, vec!["café", "près", "du", "pont"]);
    }

    #[test]
    fn test_analyze_removes_stop_words() {
        let tokens = analyze("There is no power in the whole street", true, true);
        assert_eq!(tokens, vec!["power", "street"]);
    }

    #[test]
    fn test_stop_words_are_lowercase_and_unique() {
        assert!(ENGLISH_STOP_WORDS.iter().all(|w| w.to_lowercase() == *w));
        assert_eq!(STOP_WORD_SET.len(), ENGLISH_STOP_WORDS.len());
        assert!(is_stop_word("fire"));
        assert!(!is_stop_word("water"));
    }
}
