use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keysprint::{
    app::{App, KeyOutcome},
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    word_source::PromptWordSource,
    Mode, Phase, SessionSettings,
};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the runtime + App without a TTY
#[test]
fn headless_words_flow_completes() {
    let settings = SessionSettings::new(Mode::Words, 30, 2).unwrap();
    let mut app = App::new(settings, Box::new(PromptWordSource::new("hi yo"))).unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "hi yo ".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..200u32 {
        match runner.step() {
            AppEvent::Tick => app.tick(runner.interval()),
            AppEvent::Resize => {}
            AppEvent::Key(k) => {
                assert_eq!(app.on_key(k), KeyOutcome::Continue);
            }
            AppEvent::Closed => break,
        }
        if app.engine.has_finished() {
            break;
        }
    }

    assert_eq!(app.engine.phase(), Phase::Finished);
    let stats = app.engine.final_stats().expect("final stats are set on finish");
    assert_eq!(stats.accuracy, 100);
    assert_eq!(app.engine.history().len(), 2);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let settings = SessionSettings::new(Mode::Time, 1, 25).unwrap();
    let mut app = App::new(settings, Box::new(PromptWordSource::new("hello"))).unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(10)),
    );
    tx.send(key('h')).unwrap();

    // each tick credits a tenth of a second, so about ten ticks end the test
    for _ in 0..50u32 {
        match runner.step() {
            AppEvent::Tick => app.tick(Duration::from_millis(100)),
            AppEvent::Key(k) => {
                app.on_key(k);
            }
            AppEvent::Resize => {}
            AppEvent::Closed => break,
        }
        if app.engine.has_finished() {
            break;
        }
    }

    assert!(app.engine.has_finished(), "timed session should finish by timeout");
    assert_eq!(app.engine.elapsed_secs(), 1);
    // the partial "h" is left out of the final tally
    assert_eq!(app.engine.stats().correct_chars, 0);
}

#[test]
fn headless_restart_mid_test() {
    let settings = SessionSettings::new(Mode::Words, 30, 3).unwrap();
    let mut app = App::new(settings, Box::new(PromptWordSource::new("a b c"))).unwrap();

    for c in "a b".chars() {
        app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    app.tick(Duration::from_secs(2));
    assert_eq!(app.engine.elapsed_secs(), 2);

    app.on_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    assert_eq!(app.engine.phase(), Phase::Idle);
    assert!(!app.engine.timer_active());
    app.tick(Duration::from_secs(2));
    assert_eq!(app.engine.elapsed_secs(), 0);
}

#[test]
fn headless_loop_stops_when_input_closes() {
    let settings = SessionSettings::new(Mode::Time, 30, 25).unwrap();
    let mut app = App::new(settings, Box::new(PromptWordSource::new("hello"))).unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(50)),
    );
    tx.send(key('h')).unwrap();
    drop(tx);

    let mut steps = 0u32;
    loop {
        steps += 1;
        assert!(steps < 100, "loop kept running after input closed");
        match runner.step() {
            AppEvent::Tick => app.tick(runner.interval()),
            AppEvent::Key(k) => {
                app.on_key(k);
            }
            AppEvent::Resize => {}
            AppEvent::Closed => break,
        }
    }

    assert_eq!(app.engine.phase(), Phase::Running);
    assert_eq!(app.engine.current_input(), "h");
}
