use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wordtwist::engine::{Phase, SessionEngine};
use wordtwist::feedback::Feedback;
use wordtwist::runtime::{GameEvent, Runner, TestEventSource};
use wordtwist::words::{WordList, WordSource};

// Headless integration using the internal runtime + SessionEngine without a
// TTY. Drives the same engine operations the key handler in main.rs maps to.

fn test_engine(words: &[&str], rounds: usize) -> SessionEngine {
    let list = WordList {
        name: "test".to_string(),
        size: words.len() as u32,
        words: words.iter().map(|w| w.to_string()).collect(),
    };
    SessionEngine::new(WordSource::new(list), rounds).unwrap()
}

#[test]
fn headless_session_completes_by_skipping() {
    let mut engine = test_engine(&["cat", "dog", "fox"], 3);
    engine.start().unwrap();

    let mut feedback = Feedback::default();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::with_tick_interval(es, Duration::from_millis(5));

    // Producer: skip every round
    for _ in 0..3 {
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Right,
            KeyModifiers::NONE,
        )))
        .unwrap();
    }

    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick => feedback.on_tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if key.code == KeyCode::Right {
                    if let Some(outcome) = engine.skip().unwrap() {
                        feedback.show(outcome.into());
                    }
                }
            }
        }
        if engine.state.phase == Phase::Results {
            break;
        }
    }

    assert_eq!(engine.state.phase, Phase::Results);
    assert_eq!(engine.state.score, 0);
    assert_eq!(engine.state.used_originals.len(), 3);
}

#[test]
fn headless_correct_guess_flow() {
    let mut engine = test_engine(&["cat"], 1);
    engine.start().unwrap();
    let answer = engine.state.current_word.clone().unwrap().original;

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::with_tick_interval(es, Duration::from_millis(5));

    // Producer: type the answer, then Enter
    for c in answer.chars() {
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
    tx.send(GameEvent::Key(KeyEvent::new(
        KeyCode::Enter,
        KeyModifiers::NONE,
    )))
    .unwrap();

    // Consumer: maintain an input buffer the way the app does
    let mut input = String::new();
    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick => {}
            GameEvent::Resize => {}
            GameEvent::Key(key) => match key.code {
                KeyCode::Char(c) => {
                    input.push(c);
                    engine.input_changed();
                }
                KeyCode::Enter => {
                    engine.submit_guess(&input).unwrap();
                }
                _ => {}
            },
        }
        if engine.state.phase == Phase::Results {
            break;
        }
    }

    assert_eq!(engine.state.phase, Phase::Results);
    // an immediate correct answer earns the full round score
    assert_eq!(engine.state.score, 100);
    assert!(engine.state.total_elapsed_secs >= 0.0);
}

#[test]
fn headless_wrong_then_skip_flow() {
    let mut engine = test_engine(&["cat", "dog"], 2);
    engine.start().unwrap();

    // wrong guess: round stays, phase flips to Error
    engine.submit_guess("zzz").unwrap();
    assert_eq!(engine.state.phase, Phase::Error);
    assert_eq!(engine.state.round_count, 1);

    // editing the guess dismisses the feedback phase
    engine.input_changed();
    assert_eq!(engine.state.phase, Phase::Playing);

    // skip through the rest of the session
    engine.skip().unwrap();
    engine.skip().unwrap();
    assert_eq!(engine.state.phase, Phase::Results);
    assert_eq!(engine.state.score, 0);
}
