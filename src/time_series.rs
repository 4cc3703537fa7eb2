use serde::Serialize;

use crate::stats::Stats;

/// One point of the results chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub elapsed: u64,
    pub wpm: u32,
    pub errors: usize,
}

impl Sample {
    pub fn new(elapsed: u64, wpm: u32, errors: usize) -> Self {
        Self {
            elapsed,
            wpm,
            errors,
        }
    }
}

impl From<Sample> for (f64, f64) {
    fn from(s: Sample) -> Self {
        (s.elapsed as f64, s.wpm as f64)
    }
}

/// Per-second log of live statistics. At most one sample per elapsed second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleLog {
    samples: Vec<Sample>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample unless `elapsed` is zero or already recorded last.
    /// Returns whether a sample was added.
    pub fn record(&mut self, elapsed: u64, stats: &Stats) -> bool {
        if elapsed == 0 {
            return false;
        }
        if self.samples.last().is_some_and(|s| s.elapsed == elapsed) {
            return false;
        }
        self.samples
            .push(Sample::new(elapsed, stats.wpm, stats.error_chars));
        true
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// (seconds, wpm) pairs for charting
    pub fn wpm_points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|&s| s.into()).collect()
    }

    /// (seconds, errors) pairs for charting
    pub fn error_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.elapsed as f64, s.errors as f64))
            .collect()
    }
}
