use regex::Regex;

const STOPWORDS_EN: &[&str] = &[
    "the", "and", "a", "to", "of", "in", "is", "it", "you", "that", "he", "was", "for", "on", "are",
    "with", "as", "i", "his", "they", "be", "at", "one", "have", "this", "from", "or", "had", "by",
    "not", "word", "but", "what", "some", "we", "can", "out", "other", "were", "all", "there",
    "when", "up", "use", "your", "how", "said", "an", "each", "she",
];

const STOPWORDS_PT: &[&str] = &[
    "e", "de", "o", "a", "que", "do", "da", "em", "um", "para", "é", "com", "não", "uma", "os",
    "no", "se", "na", "por", "mais", "as", "dos", "como", "mas", "foi", "ao", "ele", "das", "tem",
    "à", "seu", "sua", "ou", "ser", "quando", "muito", "há", "nos", "já", "está", "eu", "também",
    "só", "pelo", "pela", "até", "isso",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    English,
    Portuguese,
}

impl Language {
    pub fn stopwords(self) -> &'static [&'static str] {
        match self {
            Language::English => STOPWORDS_EN,
            Language::Portuguese => STOPWORDS_PT,
        }
    }
}

/// Picks a stop-word language by looking for a handful of very common
/// Portuguese words. Anything without them is treated as English.
pub struct LanguageDetector {
    marker: Regex,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        let marker = Regex::new(r"(?i)\b(?:que|de|e|uma|para)\b")
            .expect("Unable to compile Portuguese marker regex");

        LanguageDetector { marker }
    }
}

impl LanguageDetector {
    pub fn detect(&self, text: &str) -> Language {
        if self.marker.is_match(text) {
            Language::Portuguese
        } else {
            Language::English
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, LanguageDetector};

    #[test]
    fn marker_word_selects_portuguese() {
        let detector = LanguageDetector::default();

        assert_eq!(detector.detect("eu acho que vai chover"), Language::Portuguese);
        assert_eq!(detector.detect("Casa DE papel"), Language::Portuguese);
        assert_eq!(detector.detect("Que dia!"), Language::Portuguese);
    }

    #[test]
    fn marker_words_must_be_whole_words() {
        let detector = LanguageDetector::default();

        assert_eq!(detector.detect("queso decide parachute"), Language::English);
        assert_eq!(detector.detect("the quick brown fox"), Language::English);
    }

    #[test]
    fn stopword_lists_are_lowercase() {
        for lang in [Language::English, Language::Portuguese] {
            for word in lang.stopwords() {
                assert_eq!(word.to_lowercase(), *word);
            }
        }
        assert!(Language::Portuguese.stopwords().contains(&"que"));
        assert!(Language::English.stopwords().contains(&"the"));
    }
}
