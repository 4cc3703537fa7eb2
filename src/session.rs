use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Durations offered in the idle header, in seconds
pub const TIME_PRESETS: [u64; 4] = [15, 30, 60, 120];
/// Word counts offered in the idle header
pub const WORD_PRESETS: [usize; 4] = [10, 25, 50, 100];

/// Words requested for a timed test. Large enough that nobody types past it.
pub const TIME_MODE_WORD_COUNT: usize = 300;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Time,
    Words,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Time => Mode::Words,
            Mode::Words => Mode::Time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub mode: Mode,
    pub time_option: u64,
    pub word_option: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Time,
            time_option: 30,
            word_option: 25,
        }
    }
}

impl SessionSettings {
    pub fn new(mode: Mode, time_option: u64, word_option: usize) -> Result<Self, EngineError> {
        let settings = Self {
            mode,
            time_option,
            word_option,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.time_option == 0 {
            return Err(EngineError::InvalidDuration(self.time_option));
        }
        if self.word_option == 0 {
            return Err(EngineError::InvalidWordCount(self.word_option));
        }
        Ok(())
    }

    /// How many words to ask the word source for
    pub fn words_to_generate(&self) -> usize {
        match self.mode {
            Mode::Time => TIME_MODE_WORD_COUNT,
            Mode::Words => self.word_option,
        }
    }

    /// Step the option that belongs to the current mode through its presets
    pub fn cycle_option(&mut self, forward: bool) {
        match self.mode {
            Mode::Time => self.time_option = cycle(&TIME_PRESETS, self.time_option, forward),
            Mode::Words => self.word_option = cycle(&WORD_PRESETS, self.word_option, forward),
        }
    }
}

fn cycle<T: Copy + PartialOrd>(presets: &[T], current: T, forward: bool) -> T {
    // values outside the preset table snap to the nearest neighbour in the requested direction
    let idx = if forward {
        presets
            .iter()
            .position(|p| *p > current)
            .unwrap_or(0)
    } else {
        presets
            .iter()
            .rposition(|p| *p < current)
            .unwrap_or(presets.len() - 1)
    };
    presets[idx]
}
