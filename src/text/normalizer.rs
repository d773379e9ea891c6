// Text normalizer: markup stripping, tokenization, stop-word removal, and
// a deliberately naive suffix-stripping stemmer.
//
// The stemmer is not linguistically sound. Callers may rely on it being
// deterministic, nothing more. Lowercasing uses Unicode case mapping
// (`str::to_lowercase`), which does not depend on the process locale.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

use super::stopwords::StopWordList;

/// Tags and the handful of HTML entities that show up in pasted documents.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>|&nbsp;|&amp;|&lt;|&gt;|&quot;|&apos;|&#[0-9]+;")
        .expect("markup pattern is valid")
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("url pattern is valid"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Suffixes stripped by the stemmer, tried in order. At most one is removed.
const SUFFIXES: &[&str] = &["ing", "ed", "s"];

/// A stem must keep at least this many characters or the word is left alone.
const MIN_STEM_CHARS: usize = 3;

/// Stateless text normalizer over a shared stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    stop_words: &'static HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopWordList::Curated)
    }
}

impl Normalizer {
    pub fn new(list: StopWordList) -> Self {
        Self {
            stop_words: list.words(),
        }
    }

    /// Lowercase, strip markup/URLs/emails, replace everything that is not a
    /// letter, digit, whitespace or hyphen with a space, and collapse runs
    /// of whitespace. Blank input yields an empty string.
    pub fn preprocess(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        // regex-lite's \S is ASCII-only: Unicode spaces must be folded
        // before the URL and email patterns run
        let lower: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        let without_markup = MARKUP.replace_all(&lower, " ");
        let without_urls = URL.replace_all(&without_markup, " ");
        let without_emails = EMAIL.replace_all(&without_urls, " ");

        let cleaned: String = without_emails
            .chars()
            .map(|c| {
                if c.is_alphabetic() || c.is_numeric() || c.is_whitespace() || c == '-' {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split on runs of non-letter characters, dropping single-character tokens.
    pub fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| t.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }

    /// Drop stop words (case-insensitive) and stem what is left.
    pub fn filter_stopwords_and_stem(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !self.stop_words.contains(t))
            .map(|t| stem(&t).to_string())
            .collect()
    }

    /// Full pipeline: preprocess, tokenize, filter and stem.
    pub fn lemmas(&self, text: &str) -> Vec<String> {
        let normalized = self.preprocess(text);
        let tokens = self.tokenize(&normalized);
        self.filter_stopwords_and_stem(&tokens)
    }
}

/// Strip one trailing "-ing", "-ed" or plural "-s" when the stem keeps at
/// least `MIN_STEM_CHARS` characters. Words ending in "ss" keep their "s".
fn stem(word: &str) -> &str {
    for suffix in SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if *suffix == "s" && stem.ends_with('s') {
                return word;
            }
            if stem.chars().count() >= MIN_STEM_CHARS {
                return stem;
            }
            return word;
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn preprocess_blank_is_empty() {
        let n = Normalizer::default();
        assert_eq!(n.preprocess(""), "");
        assert_eq!(n.preprocess("   \n\t "), "");
    }

    #[test]
    fn preprocess_strips_markup_urls_and_emails() {
        let n = Normalizer::default();
        let out = n.preprocess(
            "<p>Hello&nbsp;World</p> see https://example.com/x?y=1 or mail bob@example.org!",
        );
        assert_eq!(out, "hello world see or mail");
    }

    #[test]
    fn unicode_space_ends_a_url_or_email() {
        let n = Normalizer::default();
        assert_eq!(
            n.preprocess("see https://example.com\u{00A0}important findings here"),
            "see important findings here"
        );
        assert_eq!(
            n.preprocess("mail bob@example.org\u{3000}tomorrow\u{2009}please"),
            "mail tomorrow please"
        );
    }

    #[test]
    fn preprocess_keeps_hyphens_digits_and_cyrillic() {
        let n = Normalizer::default();
        assert_eq!(n.preprocess("Well-known  ПРИМЕР, 42%"), "well-known пример 42");
    }

    #[test]
    fn tokenize_splits_on_non_letters_and_drops_short_tokens() {
        let n = Normalizer::default();
        assert_eq!(
            n.tokenize("well-known a b2c cat 42"),
            strings(&["well", "known", "cat"])
        );
    }

    #[test]
    fn stop_words_are_case_insensitive() {
        let n = Normalizer::default();
        let out = n.filter_stopwords_and_stem(&strings(&["The", "cat", "AND", "Между"]));
        assert_eq!(out, strings(&["cat"]));
    }

    #[test]
    fn stemmer_strips_one_suffix_when_stem_is_long_enough() {
        assert_eq!(stem("walking"), "walk");
        assert_eq!(stem("jumped"), "jump");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("red"), "red");
        assert_eq!(stem("bus"), "bus");
        assert_eq!(stem("class"), "class");
        assert_eq!(stem("things"), "thing");
    }

    #[test]
    fn lemmas_are_deterministic() {
        let n = Normalizer::default();
        let text = "The cats were jumping over <b>fences</b> near http://x.io";
        assert_eq!(n.lemmas(text), n.lemmas(text));
        assert_eq!(n.lemmas(text), strings(&["cat", "jump", "over", "fence", "near"]));
    }
}
