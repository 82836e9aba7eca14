use std::collections::{HashMap, HashSet};

use regex::Regex;

const SIZE_EXPONENT: f32 = 1.2;
const SIZE_SCALE: f32 = 8.0;

/// A distinct word of the input together with how often it occurred and the
/// font size it will be drawn at.
#[derive(Clone, Debug, PartialEq)]
pub struct WordEntry {
    pub text: String,
    pub count: usize,
    pub size: f32,
}

/// Font size in pixels for a word seen `count` times.
pub fn font_size_for_count(count: usize) -> f32 {
    (count as f32).powf(SIZE_EXPONENT) * SIZE_SCALE
}

pub struct Tokenizer {
    //开头的标点和数字
    leading: Regex,
    trailing: Regex,
    pub filter: HashSet<String>,
    pub max_words: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        let leading = Regex::new(r"^[(\[.,!?;:0-9]+").expect("Unable to compile leading regex");
        let trailing = Regex::new(r"[.,!?;:)\]]+$").expect("Unable to compile trailing regex");

        Tokenizer {
            leading,
            trailing,
            filter: Default::default(),
            max_words: 0,
        }
    }
}

impl Tokenizer {
    pub fn with_max_words(mut self, size: usize) -> Self {
        self.max_words = size;
        self
    }

    pub fn with_filter(mut self, value: &[&str]) -> Self {
        self.filter = value.iter().map(|el| el.to_lowercase()).collect();

        self
    }

    /// Strips leading brackets, punctuation and digits plus trailing
    /// punctuation, then lowercases. Returns an empty string when fewer than
    /// two characters survive.
    pub fn clean_word(&self, raw: &str) -> String {
        let word = self.leading.replace(raw, "");
        let word = self.trailing.replace(&word, "").to_lowercase();

        if word.chars().count() > 1 {
            word
        } else {
            String::new()
        }
    }

    /// The language's stop-words merged with the configured filter words.
    pub fn stopwords_for(&self, words: &[&str]) -> HashSet<String> {
        words
            .iter()
            .map(|word| word.to_string())
            .chain(self.filter.iter().cloned())
            .collect()
    }

    fn tokenize<'a>(
        &'a self,
        text: &'a str,
        stopwords: &'a HashSet<String>,
    ) -> impl Iterator<Item = String> + 'a {
        text.split_whitespace()
            .map(move |raw| self.clean_word(raw))
            .filter(move |word| !word.is_empty() && !stopwords.contains(word))
    }

    pub fn get_word_frequencies(
        &self,
        text: &str,
        stopwords: &HashSet<String>,
    ) -> HashMap<String, usize> {
        let mut frequencies = HashMap::new();

        for word in self.tokenize(text, stopwords) {
            let entry = frequencies.entry(word).or_insert(0);
            *entry += 1;
        }

        frequencies
    }

    /// Counts the words of `text` and sizes each distinct one. Entries come
    /// out by descending count, ties by text.
    pub fn score(&self, text: &str, stopwords: &HashSet<String>) -> Vec<WordEntry> {
        let mut entries: Vec<WordEntry> = self
            .get_word_frequencies(text, stopwords)
            .into_iter()
            .map(|(text, count)| WordEntry {
                text,
                count,
                size: font_size_for_count(count),
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));

        if self.max_words > 0 {
            entries.truncate(self.max_words);
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::{font_size_for_count, Tokenizer};

    fn stopwords(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn clean_word_examples() {
        let tokenizer = Tokenizer::default();

        assert_eq!(tokenizer.clean_word("Hello!"), "hello");
        assert_eq!(tokenizer.clean_word("(test)"), "test");
        assert_eq!(tokenizer.clean_word("[Rust],"), "rust");
        assert_eq!(tokenizer.clean_word("42"), "");
        assert_eq!(tokenizer.clean_word("I"), "");
        assert_eq!(tokenizer.clean_word("a1"), "a1");
        assert_eq!(tokenizer.clean_word("...!?"), "");
        assert_eq!(tokenizer.clean_word("1984."), "");
        assert_eq!(tokenizer.clean_word("3rd"), "rd");
        assert_eq!(tokenizer.clean_word("(12abc"), "abc");
        assert_eq!(tokenizer.clean_word("Não"), "não");
    }

    #[test]
    fn scores_words_without_stopwords() {
        let tokenizer = Tokenizer::default();
        let entries = tokenizer.score("the cat sat on the mat", &stopwords(&["the", "on"]));

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["cat", "mat", "sat"]);
        for entry in &entries {
            assert_eq!(entry.count, 1);
            assert!((entry.size - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn counts_are_case_and_punctuation_insensitive() {
        let tokenizer = Tokenizer::default();
        let frequencies =
            tokenizer.get_word_frequencies("Rust rust, RUST! (rust) crab", &HashSet::new());

        assert_eq!(frequencies.get("rust"), Some(&4));
        assert_eq!(frequencies.get("crab"), Some(&1));
        assert_eq!(frequencies.len(), 2);
    }

    #[test]
    fn entries_are_sorted_and_truncated() {
        let tokenizer = Tokenizer::default().with_max_words(2);
        let entries = tokenizer.score("bb aa cc cc dd dd dd", &HashSet::new());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "dd");
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[1].text, "cc");
        assert!(entries[0].size > entries[1].size);
    }

    #[test]
    fn filter_words_join_the_stopwords() {
        let tokenizer = Tokenizer::default().with_filter(&["Crab"]);
        let stopwords = tokenizer.stopwords_for(&["the"]);
        let entries = tokenizer.score("the crab likes the rust", &stopwords);

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["likes", "rust"]);
    }

    #[test]
    fn whitespace_only_text_has_no_entries() {
        let tokenizer = Tokenizer::default();

        assert!(tokenizer.score(" \t\n ", &HashSet::new()).is_empty());
    }

    #[test]
    fn size_grows_with_count() {
        assert!((font_size_for_count(1) - 8.0).abs() < 1e-4);
        for count in 1..200 {
            assert!(font_size_for_count(count) < font_size_for_count(count + 1));
        }
    }

    proptest! {
        #[test]
        fn clean_word_is_idempotent(raw in "\\PC{0,16}") {
            let tokenizer = Tokenizer::default();
            let once = tokenizer.clean_word(&raw);

            prop_assert_eq!(tokenizer.clean_word(&once), once);
        }

        #[test]
        fn clean_word_output_is_trimmed(raw in "[a-zA-Z0-9()\\[\\].,!?;: ]{0,16}") {
            let tokenizer = Tokenizer::default();
            let word = tokenizer.clean_word(&raw);

            if !word.is_empty() {
                let first = word.chars().next().unwrap();
                let last = word.chars().last().unwrap();

                prop_assert!(word.chars().count() > 1);
                prop_assert!(!first.is_ascii_digit());
                prop_assert!(!"([.,!?;:".contains(first));
                prop_assert!(!".,!?;:".contains(last));
            }
        }
    }
}
