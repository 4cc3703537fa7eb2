use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::LanguageError;

static LANG_DIR: Dir = include_dir!("src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(file_name: &str) -> Result<Self, LanguageError> {
        read_language_from_file(&format!("{file_name}.json"))
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language, LanguageError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| LanguageError::NotFound(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| LanguageError::Encoding(file_name.to_string()))?;

    let mut lang: Language = from_str(file_as_str)?;
    // a token containing whitespace would be split into two words by the engine
    lang.words
        .retain(|w| !w.is_empty() && !w.chars().any(char::is_whitespace));

    Ok(lang)
}
