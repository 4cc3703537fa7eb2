use serde::Serialize;

/// A word the typist has moved past. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub target: String,
    pub input: String,
    pub correct_chars: usize,
    pub total_chars: usize,
    pub exact: bool,
}

impl WordEntry {
    pub fn score(target: &str, input: &str) -> Self {
        let tally = Tally::of(target, input);
        Self {
            target: target.to_string(),
            input: input.to_string(),
            correct_chars: tally.correct,
            total_chars: tally.correct + tally.errors,
            exact: input == target,
        }
    }

    pub fn error_chars(&self) -> usize {
        self.total_chars - self.correct_chars
    }
}

/// Positional comparison of one word's input against its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub errors: usize,
}

impl Tally {
    pub fn of(target: &str, input: &str) -> Self {
        let correct = input
            .chars()
            .zip(target.chars())
            .filter(|(typed, expected)| typed == expected)
            .count();
        let typed = input.chars().count();
        // overflow characters beyond the target land in errors
        Self {
            correct,
            errors: typed - correct,
        }
    }
}

/// Statistics shown to the typist, live while running and frozen once finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: u32,
    /// includes one unit per committed word boundary
    pub correct_chars: usize,
    pub error_chars: usize,
}

/// Rates are computed over at least half a minute so early wpm stays sane
pub const MIN_ELAPSED_SECS: u64 = 30;

/// Roll the committed history, plus an optional in-flight word, into a snapshot
pub fn compute(history: &[WordEntry], partial: Option<Tally>, elapsed_secs: u64) -> Stats {
    let mut correct = 0usize;
    let mut errors = 0usize;
    let spaces = history.len();

    for entry in history {
        correct += entry.correct_chars;
        errors += entry.error_chars();
    }

    if let Some(tally) = partial {
        correct += tally.correct;
        errors += tally.errors;
    }

    let minutes = elapsed_secs.max(MIN_ELAPSED_SECS) as f64 / 60.0;
    let credited = (correct + spaces) as f64;
    let total = correct + errors + spaces;

    let wpm = (credited / 5.0 / minutes).round() as u32;
    let accuracy = if total > 0 {
        (credited / total as f64 * 100.0).round() as u32
    } else {
        100
    };

    Stats {
        wpm,
        accuracy,
        correct_chars: correct + spaces,
        error_chars: errors,
    }
}
