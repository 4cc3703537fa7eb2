use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::engine::{Phase, TypingEngine};
use crate::error::EngineError;
use crate::session::SessionSettings;
use crate::word_source::WordSource;

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Presentation state around one engine: the input field and option selection
#[derive(Debug)]
pub struct App {
    pub engine: TypingEngine,
    field: String,
    settings_changed: bool,
}

impl App {
    pub fn new(settings: SessionSettings, source: Box<dyn WordSource>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: TypingEngine::new(settings, source)?,
            field: String::new(),
            settings_changed: false,
        })
    }

    /// Contents of the hidden input field
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn settings(&self) -> SessionSettings {
        *self.engine.settings()
    }

    /// True once the typist picked a different mode or option this run
    pub fn settings_changed(&self) -> bool {
        self.settings_changed
    }

    pub fn restart(&mut self) {
        self.field.clear();
        self.engine.reset();
    }

    pub fn tick(&mut self, dt: Duration) {
        self.engine.advance(dt);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Tab => self.restart(),
            KeyCode::Left | KeyCode::Right if !self.engine.has_started() => {
                let mut settings = self.settings();
                settings.cycle_option(key.code == KeyCode::Right);
                self.apply_settings(settings);
            }
            KeyCode::Up | KeyCode::Down if !self.engine.has_started() => {
                let mut settings = self.settings();
                settings.mode = settings.mode.toggled();
                self.apply_settings(settings);
            }
            KeyCode::Backspace if self.engine.phase() != Phase::Finished => {
                self.field.pop();
                let field = self.field.clone();
                self.engine.submit_input(&field);
            }
            KeyCode::Char(c) if self.engine.phase() != Phase::Finished => {
                if c == crate::engine::SEPARATOR && self.field.is_empty() {
                    // leading space; the field would just trim it away
                    return KeyOutcome::Continue;
                }
                self.field.push(c);
                let field = self.field.clone();
                self.engine.submit_input(&field);
                if field.ends_with(crate::engine::SEPARATOR) {
                    self.field.clear();
                }
            }
            _ => {}
        }

        KeyOutcome::Continue
    }

    fn apply_settings(&mut self, settings: SessionSettings) {
        match self.engine.reconfigure(settings) {
            Ok(()) => {
                self.field.clear();
                self.settings_changed = true;
                debug!(mode = %settings.mode, time = settings.time_option, words = settings.word_option, "settings changed");
            }
            Err(err) => debug!(%err, "settings rejected"),
        }
    }
}
