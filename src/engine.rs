use std::fmt;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::error::EngineError;
use crate::session::{Mode, SessionSettings};
use crate::stats::{self, Stats, Tally, WordEntry};
use crate::time_series::{Sample, SampleLog};
use crate::word_source::WordSource;

/// Typing this character commits the active word
pub const SEPARATOR: char = ' ';

/// The engine's timer fires once per this interval
pub const TIMER_CADENCE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Mode-aware reading of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerValue {
    /// countdown, time mode
    Remaining(u64),
    /// count-up, words mode
    Elapsed(u64),
}

impl TimerValue {
    pub fn seconds(&self) -> u64 {
        match *self {
            TimerValue::Remaining(s) | TimerValue::Elapsed(s) => s,
        }
    }
}

/// Everything that can mutate a running test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// full contents of the input field
    Input(String),
    /// one timer period has passed
    Tick,
}

/// Handle for the periodic timer. Exists only while a test is running.
#[derive(Debug, Default)]
struct Timer {
    pending: Duration,
}

impl Timer {
    /// Accumulate host time and return how many whole periods it completes
    fn advance(&mut self, dt: Duration) -> u32 {
        self.pending += dt;
        let mut fired = 0;
        while self.pending >= TIMER_CADENCE {
            self.pending -= TIMER_CADENCE;
            fired += 1;
        }
        fired
    }
}

/// A single typing test: words, progress, timer and statistics
pub struct TypingEngine {
    settings: SessionSettings,
    source: Box<dyn WordSource>,
    phase: Phase,
    words: Vec<String>,
    cursor: usize,
    current_input: String,
    history: Vec<WordEntry>,
    live: Stats,
    final_stats: Option<Stats>,
    samples: SampleLog,
    // remaining seconds in time mode, elapsed seconds in words mode
    timer_value: u64,
    timer: Option<Timer>,
}

impl fmt::Debug for TypingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingEngine")
            .field("settings", &self.settings)
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("current_input", &self.current_input)
            .field("history", &self.history.len())
            .field("stats", &self.stats())
            .field("timer", &self.timer())
            .finish_non_exhaustive()
    }
}

impl TypingEngine {
    pub fn new(settings: SessionSettings, source: Box<dyn WordSource>) -> Result<Self, EngineError> {
        settings.validate()?;
        let mut engine = Self {
            settings,
            source,
            phase: Phase::Idle,
            words: vec![],
            cursor: 0,
            current_input: String::new(),
            history: vec![],
            live: Stats::default(),
            final_stats: None,
            samples: SampleLog::new(),
            timer_value: 0,
            timer: None,
        };
        engine.reset();
        if engine.words.is_empty() {
            return Err(EngineError::EmptyWordList(settings.words_to_generate()));
        }
        Ok(engine)
    }

    /// Discard all progress and start over with a fresh word list
    pub fn reset(&mut self) {
        self.timer = None;
        self.phase = Phase::Idle;
        self.words = self
            .source
            .generate(self.settings.words_to_generate())
            .split_whitespace()
            .map(str::to_string)
            .collect();
        self.cursor = 0;
        self.current_input.clear();
        self.history.clear();
        self.live = Stats::default();
        self.final_stats = None;
        self.samples.clear();
        self.timer_value = match self.settings.mode {
            Mode::Time => self.settings.time_option,
            Mode::Words => 0,
        };
        info!(
            mode = %self.settings.mode,
            words = self.words.len(),
            "test reset"
        );
    }

    /// Swap in new settings and reset. Invalid settings leave the engine untouched.
    pub fn reconfigure(&mut self, settings: SessionSettings) -> Result<(), EngineError> {
        settings.validate()?;
        self.settings = settings;
        self.reset();
        Ok(())
    }

    pub fn handle(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Input(raw) => self.submit_input(&raw),
            EngineEvent::Tick => self.on_tick(),
        }
    }

    /// Feed the whole current contents of the input field
    pub fn submit_input(&mut self, raw: &str) {
        if self.phase == Phase::Finished {
            return;
        }

        if self.phase == Phase::Idle {
            self.start();
        }

        if raw.ends_with(SEPARATOR) {
            self.commit(raw.trim());
        } else {
            self.current_input.clear();
            self.current_input.push_str(raw);
        }

        if self.phase == Phase::Running {
            self.refresh_live();
        }
    }

    /// One timer period. Ignored unless the timer is active.
    pub fn on_tick(&mut self) {
        if self.timer.is_none() {
            return;
        }

        match self.settings.mode {
            Mode::Time => {
                self.timer_value = self.timer_value.saturating_sub(1);
                trace!(remaining = self.timer_value, "tick");
                if self.timer_value == 0 {
                    self.finish();
                    return;
                }
            }
            Mode::Words => {
                self.timer_value += 1;
                trace!(elapsed = self.timer_value, "tick");
            }
        }

        self.refresh_live();
    }

    /// Advance the timer by host time; fires `on_tick` for each whole period
    pub fn advance(&mut self, dt: Duration) {
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.advance(dt),
            None => return,
        };
        for _ in 0..fired {
            if self.timer.is_none() {
                break;
            }
            self.on_tick();
        }
    }

    fn start(&mut self) {
        self.phase = Phase::Running;
        self.timer = Some(Timer::default());
        info!(mode = %self.settings.mode, "test started");
    }

    fn commit(&mut self, input: &str) {
        let Some(target) = self.words.get(self.cursor) else {
            // nothing left to type; drop the separator and keep the text
            self.current_input.clear();
            self.current_input.push_str(input);
            return;
        };

        let entry = WordEntry::score(target, input);
        debug!(
            index = self.cursor,
            expected = %entry.target,
            input = %entry.input,
            correct = entry.correct_chars,
            total = entry.total_chars,
            "word committed"
        );
        self.history.push(entry);
        self.cursor += 1;

        if self.settings.mode == Mode::Words && self.cursor >= self.settings.word_option {
            self.finish();
        }

        self.current_input.clear();
    }

    fn finish(&mut self) {
        self.timer = None;
        self.phase = Phase::Finished;
        // the in-flight word is left out of the final tally
        let final_stats = self.compute_stats(true);
        info!(
            wpm = final_stats.wpm,
            accuracy = final_stats.accuracy,
            words = self.history.len(),
            "test finished"
        );
        self.final_stats = Some(final_stats);
    }

    fn refresh_live(&mut self) {
        self.live = self.compute_stats(false);
        let elapsed = self.elapsed_secs();
        self.samples.record(elapsed, &self.live);
    }

    /// Snapshot of the current statistics. `final_tally` leaves out the active word.
    pub fn compute_stats(&self, final_tally: bool) -> Stats {
        let partial = if final_tally {
            None
        } else {
            self.active_word()
                .map(|target| Tally::of(target, &self.current_input))
        };
        stats::compute(&self.history, partial, self.elapsed_secs())
    }

    pub fn timer(&self) -> TimerValue {
        match self.settings.mode {
            Mode::Time => TimerValue::Remaining(self.timer_value),
            Mode::Words => TimerValue::Elapsed(self.timer_value),
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self.timer() {
            TimerValue::Remaining(remaining) => self.settings.time_option.saturating_sub(remaining),
            TimerValue::Elapsed(elapsed) => elapsed,
        }
    }

    /// Live statistics while running, the frozen tally once finished
    pub fn stats(&self) -> Stats {
        self.final_stats.unwrap_or(self.live)
    }

    pub fn final_stats(&self) -> Option<Stats> {
        self.final_stats
    }

    pub fn active_word(&self) -> Option<&str> {
        self.words.get(self.cursor).map(String::as_str)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn history(&self) -> &[WordEntry] {
        &self.history
    }

    pub fn samples(&self) -> &[Sample] {
        self.samples.samples()
    }

    pub fn sample_log(&self) -> &SampleLog {
        &self.samples
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}
