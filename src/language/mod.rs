pub mod core;

pub use core::Language;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Word lists bundled with the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupportedLanguage {
    English,
}

impl SupportedLanguage {
    pub fn file_stem(&self) -> String {
        self.to_string()
    }
}
