use rand::seq::SliceRandom;

use crate::error::LanguageError;
use crate::language::{Language, SupportedLanguage};

/// Supplies the words for a test
pub trait WordSource {
    /// Return `count` whitespace-separated words
    fn generate(&self, count: usize) -> String;
}

/// Random words drawn from a bundled word list
#[derive(Debug, Clone)]
pub struct LanguageWordSource {
    language: Language,
}

impl LanguageWordSource {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn load(supported: SupportedLanguage) -> Result<Self, LanguageError> {
        Ok(Self::new(Language::new(&supported.file_stem())?))
    }
}

impl WordSource for LanguageWordSource {
    fn generate(&self, count: usize) -> String {
        let mut rng = rand::thread_rng();
        // sampled with replacement so a timed test never runs out
        (0..count)
            .filter_map(|_| self.language.words.choose(&mut rng))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A fixed prompt, repeated as needed to fill the request
#[derive(Debug, Clone)]
pub struct PromptWordSource {
    words: Vec<String>,
}

impl PromptWordSource {
    pub fn new(prompt: &str) -> Self {
        Self {
            words: prompt.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl WordSource for PromptWordSource {
    fn generate(&self, count: usize) -> String {
        self.words
            .iter()
            .cycle()
            .take(count)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: WordSource + ?Sized> WordSource for Box<S> {
    fn generate(&self, count: usize) -> String {
        (**self).generate(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_source_returns_requested_count() {
        let source = LanguageWordSource::load(SupportedLanguage::English).unwrap();
        let words = source.generate(300);
        assert_eq!(words.split_whitespace().count(), 300);
    }

    #[test]
    fn language_source_uses_single_spaces() {
        let source = LanguageWordSource::load(SupportedLanguage::English).unwrap();
        let words = source.generate(20);
        assert!(!words.starts_with(' '));
        assert!(!words.ends_with(' '));
        assert!(!words.contains("  "));
    }

    #[test]
    fn prompt_source_cycles() {
        let source = PromptWordSource::new("abc def");
        assert_eq!(source.generate(2), "abc def");
        assert_eq!(source.generate(5), "abc def abc def abc");
        assert_eq!(source.generate(1), "abc");
    }

    #[test]
    fn empty_prompt_generates_nothing() {
        let source = PromptWordSource::new("   ");
        assert_eq!(source.generate(10), "");
    }

    #[test]
    fn boxed_source_delegates() {
        let source: Box<dyn WordSource> = Box::new(PromptWordSource::new("one"));
        assert_eq!(source.generate(2), "one one");
    }
}
