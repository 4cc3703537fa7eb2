pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    engine::{Phase, TimerValue, TypingEngine},
    session::{Mode, TIME_PRESETS, WORD_PRESETS},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// Committed words kept on screen before the active one
const WORDS_BEHIND: usize = 8;
/// Upcoming words rendered after the active one
const WORDS_AHEAD: usize = 40;

/// How one character of a word is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Pending,
    Correct,
    Error,
    /// part of a committed word the typist skipped
    Missing,
    /// typed past the end of the target
    Extra,
}

/// Classify every character of `target`, followed by any overflow from `typed`
pub fn char_states(target: &str, typed: &str, committed: bool) -> Vec<(char, CharState)> {
    let mut typed_chars = typed.chars();
    let mut out: Vec<(char, CharState)> = target
        .chars()
        .map(|expected| match typed_chars.next() {
            Some(got) if got == expected => (expected, CharState::Correct),
            Some(_) => (expected, CharState::Error),
            None if committed => (expected, CharState::Missing),
            None => (expected, CharState::Pending),
        })
        .collect();
    out.extend(typed_chars.map(|c| (c, CharState::Extra)));
    out
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.engine.phase() {
            Phase::Idle | Phase::Running => render_typing(&self.engine, area, buf),
            Phase::Finished => render_results(&self.engine, area, buf),
        }
    }
}

fn render_typing(engine: &TypingEngine, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let words_height = area.height.saturating_sub(VERTICAL_MARGIN * 2 + 4).min(6);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),
            Constraint::Length(1), // timer
            Constraint::Length(words_height),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    // options are hidden while a test runs
    if engine.phase() == Phase::Idle {
        Paragraph::new(header_line(engine))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);
    }

    let timer = engine.timer();
    let timer_text = match (engine.phase(), timer) {
        (Phase::Idle, _) => String::new(),
        (_, TimerValue::Remaining(_)) => timer.seconds().to_string(),
        (_, TimerValue::Elapsed(_)) => format!(
            "{}s   {}/{}",
            timer.seconds(),
            engine.cursor(),
            engine.settings().word_option
        ),
    };
    let live = engine.stats();
    let timer_line = if engine.phase() == Phase::Running {
        Line::from(vec![
            Span::styled(timer_text, Style::default().patch(bold_style).fg(Color::Yellow)),
            Span::styled(
                format!("   {} wpm   {}% acc", live.wpm, live.accuracy),
                dim_bold_style,
            ),
        ])
    } else {
        Line::from(Span::raw(timer_text))
    };
    Paragraph::new(timer_line).render(chunks[2], buf);

    let max_chars_per_line = chunks[3].width.max(1) as usize;
    let line = words_line(engine);
    let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    let alignment = if plain.width() <= max_chars_per_line {
        // when the words fit on one line
        // centering the text gives a nice zen feeling
        Alignment::Center
    } else {
        Alignment::Left
    };
    Paragraph::new(line)
        .alignment(alignment)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let legend = if engine.phase() == Phase::Idle {
        "(tab) restart / (←/→) option / (↑/↓) mode / (esc)ape"
    } else {
        "(tab) restart / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic_style))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
}

fn header_line(engine: &TypingEngine) -> Line<'static> {
    let selected = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let unselected = Style::default().add_modifier(Modifier::DIM);
    let settings = engine.settings();

    let pick = |on: bool| if on { selected } else { unselected };

    let mut spans = vec![
        Span::styled("time", pick(settings.mode == Mode::Time)),
        Span::raw(" "),
        Span::styled("words", pick(settings.mode == Mode::Words)),
        Span::raw("   |  "),
    ];

    let options: Vec<(String, bool)> = match settings.mode {
        Mode::Time => TIME_PRESETS
            .iter()
            .map(|t| (t.to_string(), *t == settings.time_option))
            .collect(),
        Mode::Words => WORD_PRESETS
            .iter()
            .map(|w| (w.to_string(), *w == settings.word_option))
            .collect(),
    };
    let any_selected = options.iter().any(|(_, on)| *on);
    for (label, on) in options {
        spans.push(Span::styled(label, pick(on)));
        spans.push(Span::raw(" "));
    }
    if !any_selected {
        // a custom value from the command line
        let custom = match settings.mode {
            Mode::Time => settings.time_option.to_string(),
            Mode::Words => settings.word_option.to_string(),
        };
        spans.push(Span::styled(custom, selected));
    }

    Line::from(spans)
}

fn words_line(engine: &TypingEngine) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let style_for = |state: CharState| match state {
        CharState::Pending => Style::default().patch(bold_style).add_modifier(Modifier::DIM),
        CharState::Correct => Style::default().patch(bold_style).fg(Color::Green),
        CharState::Error | CharState::Missing => Style::default().patch(bold_style).fg(Color::Red),
        CharState::Extra => Style::default().fg(Color::LightRed),
    };
    let caret_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::UNDERLINED | Modifier::DIM);

    let cursor = engine.cursor();
    let start = cursor.saturating_sub(WORDS_BEHIND);
    let end = engine.words().len().min(cursor + WORDS_AHEAD + 1);

    let mut spans = Vec::new();
    for (idx, target) in engine.words()[start..end].iter().enumerate() {
        let idx = idx + start;
        let states = match engine.history().get(idx) {
            Some(entry) => char_states(target, &entry.input, true),
            None if idx == cursor => char_states(target, engine.current_input(), false),
            None => char_states(target, "", false),
        };

        let caret_at = (idx == cursor).then(|| engine.current_input().chars().count());
        for (pos, (c, state)) in states.into_iter().enumerate() {
            let style = if caret_at == Some(pos) {
                caret_style
            } else {
                style_for(state)
            };
            spans.push(Span::styled(c.to_string(), style));
        }
        if let Some(pos) = caret_at {
            if pos >= target.chars().count().max(engine.current_input().chars().count()) {
                spans.push(Span::styled(" ", caret_style));
                continue;
            }
        }
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

fn render_results(engine: &TypingEngine, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let magenta_style = Style::default().fg(Color::Magenta);
    let red_style = Style::default().fg(Color::Red);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let log = engine.sample_log();
    let wpm_points = log.wpm_points();
    let error_points = log.error_points();
    let (overall_duration, highest) = charting::compute_chart_params(log.samples());

    let datasets = vec![
        Dataset::default()
            .name("wpm")
            .marker(Marker::Braille)
            .style(magenta_style)
            .graph_type(GraphType::Line)
            .data(&wpm_points),
        Dataset::default()
            .name("errors")
            .marker(Marker::Braille)
            .style(red_style)
            .graph_type(GraphType::Line)
            .data(&error_points),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest), bold_style),
                ]),
        );
    chart.render(chunks[0], buf);

    let stats = engine.stats();
    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}/{} characters   {}s",
            stats.wpm,
            stats.accuracy,
            stats.correct_chars,
            stats.error_chars,
            engine.elapsed_secs()
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled("(tab) next test / (esc)ape", italic_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionSettings;
    use crate::word_source::PromptWordSource;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app(mode: Mode, words: usize, prompt: &str) -> App {
        let settings = SessionSettings::new(mode, 30, words).unwrap();
        App::new(settings, Box::new(PromptWordSource::new(prompt))).unwrap()
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_char_states_for_active_word() {
        assert_eq!(
            char_states("abc", "ax", false),
            vec![
                ('a', CharState::Correct),
                ('b', CharState::Error),
                ('c', CharState::Pending),
            ]
        );
    }

    #[test]
    fn test_char_states_for_committed_word() {
        assert_eq!(
            char_states("abc", "a", true),
            vec![
                ('a', CharState::Correct),
                ('b', CharState::Missing),
                ('c', CharState::Missing),
            ]
        );
    }

    #[test]
    fn test_char_states_overflow() {
        assert_eq!(
            char_states("ab", "abzz", false),
            vec![
                ('a', CharState::Correct),
                ('b', CharState::Correct),
                ('z', CharState::Extra),
                ('z', CharState::Extra),
            ]
        );
    }

    #[test]
    fn test_idle_shows_options() {
        let app = create_test_app(Mode::Time, 25, "hello world");
        let rendered = render(&app, 100, 24);
        assert!(rendered.contains("time"));
        assert!(rendered.contains("120"));
        assert!(rendered.contains("hello"));
    }

    #[test]
    fn test_running_shows_countdown_and_live_stats() {
        let mut app = create_test_app(Mode::Time, 25, "hello world");
        type_str(&mut app, "hel");
        let rendered = render(&app, 100, 24);
        assert!(rendered.contains("30"));
        assert!(rendered.contains("wpm"));
        assert!(!rendered.contains("120"));
    }

    #[test]
    fn test_words_mode_shows_progress() {
        let mut app = create_test_app(Mode::Words, 10, "hello world");
        type_str(&mut app, "hello ");
        let rendered = render(&app, 100, 24);
        assert!(rendered.contains("1/10"));
    }

    #[test]
    fn test_results_screen() {
        let mut app = create_test_app(Mode::Words, 2, "abc def");
        type_str(&mut app, "a");
        app.tick(std::time::Duration::from_secs(1));
        type_str(&mut app, "bc def ");
        assert!(app.engine.has_finished());
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("100% acc"));
        assert!(rendered.contains("8/0 characters"));
        assert!(rendered.contains("next test"));
    }

    #[test]
    fn test_renders_in_tiny_area() {
        let mut app = create_test_app(Mode::Time, 25, "hello world");
        render(&app, 12, 3);
        type_str(&mut app, "hello wor");
        render(&app, 12, 3);
    }

    #[test]
    fn test_renders_long_word_list() {
        let app = create_test_app(Mode::Words, 100, "supercalifragilistic expialidocious");
        let rendered = render(&app, 40, 20);
        assert!(!rendered.trim().is_empty());
    }
}
