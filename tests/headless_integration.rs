use std::sync::mpsc;
use std::time::Duration;

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskbuddy::calculator::Calculator;
use deskbuddy::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use deskbuddy::timer::{CountdownTimer, TickOutcome};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Drives the calculator through the same runtime the binary uses, without a TTY.
#[test]
fn headless_calculator_flow() {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "12+30".chars() {
        tx.send(key(c)).unwrap();
    }
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
    drop(tx);

    let mut calc = Calculator::new();
    for _ in 0..20u32 {
        match runner.step() {
            AppEvent::Key(k) => match k.code {
                KeyCode::Enter => calc.input("="),
                KeyCode::Char(c) => calc.input(&c.to_string()),
                _ => {}
            },
            AppEvent::Resize => {}
            AppEvent::Tick => break,
        }
    }

    assert_eq!(calc.display(), "42");
}

// Ticks arrive from the runner once the channel is empty; a short session
// completes and refills on its own.
#[test]
fn headless_timer_completes_on_ticks() {
    let (_tx, rx) = mpsc::channel::<AppEvent>();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    let mut timer = CountdownTimer::new(3);
    timer.start();

    let mut outcomes = Vec::new();
    for _ in 0..3u32 {
        if let AppEvent::Tick = runner.step() {
            outcomes.push(timer.tick());
        }
    }

    assert_eq!(outcomes.len(), 3);
    assert_matches!(outcomes[0], TickOutcome::Progress { remaining: 2, .. });
    assert_matches!(outcomes[1], TickOutcome::Progress { remaining: 1, .. });
    assert_matches!(
        outcomes[2],
        TickOutcome::Completed {
            sessions_completed: 1
        }
    );
    assert_eq!(timer.remaining_secs(), 3);
    assert!(!timer.is_running());
}
