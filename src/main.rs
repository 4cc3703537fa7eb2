use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keysprint::{
    app::{App, KeyOutcome},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::SupportedLanguage,
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Mode, SessionSettings},
    word_source::{LanguageWordSource, PromptWordSource, WordSource},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Instant,
};
use tracing::{info, warn};

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test. Race the clock in time mode or finish a fixed number of words in words mode, then review your speed and errors second by second."
)]
pub struct Cli {
    /// test mode: a countdown, or a fixed number of words
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// number of seconds to run a timed test
    #[clap(short = 's', long)]
    number_of_secs: Option<u64>,

    /// number of words in a words test
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// custom prompt to use instead of random words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// language to pull words from
    #[clap(short = 'l', long, value_enum)]
    supported_language: Option<SupportedLanguage>,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(secs) = self.number_of_secs {
            cfg.time_option = secs;
        }
        if let Some(words) = self.number_of_words {
            cfg.word_option = words;
        }
        if let Some(lang) = self.supported_language {
            cfg.language = lang;
        }
        cfg
    }

    fn word_source(&self, cfg: &Config) -> Result<Box<dyn WordSource>, Box<dyn Error>> {
        let source: Box<dyn WordSource> = match &self.prompt {
            Some(prompt) => Box::new(PromptWordSource::new(prompt)),
            None => Box::new(LanguageWordSource::load(cfg.language)?),
        };
        Ok(source)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // logging is best effort
        if let Err(err) = logging::init(&path) {
            eprintln!("{}", logging::failure_notice(&path, &err));
        }
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    let settings: SessionSettings = match cfg.session().validate() {
        Ok(()) => cfg.session(),
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err).exit();
        }
    };

    let mut app = App::new(settings, cli.word_source(&cfg)?)?;
    info!(mode = %settings.mode, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // remember the last choice, whether it came from flags or the idle header
    let flags_given =
        cli.mode.is_some() || cli.number_of_secs.is_some() || cli.number_of_words.is_some();
    if app.settings_changed() || flags_given {
        let mut cfg = cfg;
        cfg.set_session(&app.settings());
        if let Err(err) = store.save(&cfg) {
            warn!(%err, "unable to save config");
        }
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let mut last_tick = Instant::now();

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                let now = Instant::now();
                let was_running = app.engine.timer_active();
                app.tick(now - last_tick);
                last_tick = now;
                if was_running {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            AppEvent::Key(key) => {
                if app.on_key(key) == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            AppEvent::Closed => {
                warn!("terminal input closed");
                break;
            }
        }
    }

    Ok(())
}
