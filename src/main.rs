mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use wordtwist::{
    config::{Config, ConfigStore, FileConfigStore},
    engine::{Phase, SessionEngine},
    feedback::{Feedback, FeedbackKind},
    runtime::{CrosstermEventSource, GameEvent, Runner},
    words::{WordList, WordSource},
};

/// casual word-unscrambling game with speed-based scoring
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Unscramble words against the clock. Each round shows a scrambled word; answer fast for up to 100 points, or at least 10 for a slow correct guess. Skipping earns nothing but moves on."
)]
pub struct Cli {
    /// number of rounds per game (defaults to the saved preference)
    #[clap(short = 'r', long)]
    rounds: Option<usize>,

    /// word list to draw from (defaults to the saved preference)
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<SupportedWordList>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SupportedWordList {
    Standard,
    Tech,
    Space,
}

impl SupportedWordList {
    fn as_word_list(&self) -> WordList {
        WordList::new(self.to_string())
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::Standard),
            "tech" => Some(Self::Tech),
            "space" => Some(Self::Space),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub engine: SessionEngine,
    pub input: String,
    pub feedback: Feedback,
}

impl App {
    pub fn new(rounds: usize, list: WordList) -> Result<Self, Box<dyn Error>> {
        let mut engine = SessionEngine::new(WordSource::new(list), rounds)?;
        engine.start()?;

        Ok(Self {
            engine,
            input: String::new(),
            feedback: Feedback::default(),
        })
    }

    /// Play again: the engine replaces its session wholesale.
    pub fn reset(&mut self) -> Result<(), Box<dyn Error>> {
        self.engine.start()?;
        self.input.clear();
        self.feedback.clear();
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let saved = store.load();
    let word_list = cli.word_list.unwrap_or_else(|| {
        SupportedWordList::from_name(&saved.word_list).unwrap_or(SupportedWordList::Standard)
    });
    let rounds = cli.rounds.unwrap_or(saved.rounds);
    let list = word_list.as_word_list();

    if list.is_empty() || rounds == 0 || rounds > list.len() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::ValueValidation,
            format!(
                "rounds must be between 1 and {} for the {} word list",
                list.len(),
                word_list
            ),
        )
        .exit();
    }

    let _ = store.save(&Config {
        rounds,
        word_list: word_list.to_string(),
    });

    let mut app = App::new(rounds, list)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

#[derive(Debug)]
enum ExitType {
    Replay,
    Quit,
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match runner.step() {
                GameEvent::Tick => {
                    let had_feedback = app.feedback.is_active();
                    app.feedback.on_tick();

                    // Redraw while a round is open (the timer display moves)
                    // or a toast is fading out
                    let phase = app.engine.state.phase;
                    if matches!(phase, Phase::Playing | Phase::Error) || had_feedback {
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                GameEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                GameEvent::Key(key) => {
                    match app.engine.state.phase {
                        Phase::Playing | Phase::Error => match key.code {
                            KeyCode::Esc => break,
                            KeyCode::Char(c) => {
                                if key.modifiers.contains(KeyModifiers::CONTROL)
                                    && key.code == KeyCode::Char('c')
                                // ctrl+c to quit
                                {
                                    break;
                                }

                                app.input.push(c);
                                app.engine.input_changed();
                            }
                            KeyCode::Backspace => {
                                app.input.pop();
                                app.engine.input_changed();
                            }
                            KeyCode::Enter => {
                                if !app.input.trim().is_empty() {
                                    let guess = app.input.clone();
                                    if let Some(outcome) = app.engine.submit_guess(&guess)? {
                                        app.feedback.show(outcome.into());
                                        app.input.clear();
                                    } else if app.engine.state.phase == Phase::Error {
                                        app.feedback.show(FeedbackKind::Incorrect);
                                    }
                                }
                            }
                            KeyCode::Right => {
                                if let Some(outcome) = app.engine.skip()? {
                                    app.feedback.show(outcome.into());
                                    app.input.clear();
                                }
                            }
                            KeyCode::Tab => {
                                app.engine.reshuffle_current();
                            }
                            _ => {}
                        },
                        Phase::Results => match key.code {
                            KeyCode::Esc | KeyCode::Char('q') => break,
                            KeyCode::Char('p') => {
                                exit_type = ExitType::Replay;
                                break;
                            }
                            _ => {}
                        },
                        Phase::Loading => {
                            if key.code == KeyCode::Esc {
                                break;
                            }
                        }
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Replay => {
                app.reset()?;
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
