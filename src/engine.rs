use crate::words::{Word, WordSource, WordsError};
use std::collections::HashSet;
use std::time::SystemTime;

pub const DEFAULT_TOTAL_ROUNDS: usize = 5;
pub const MAX_ROUND_POINTS: u32 = 100;
pub const MIN_ROUND_POINTS: u32 = 10;

/// Session phases. `Error` is transient wrong-guess feedback, not an engine
/// failure: the round stays live and the clock keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Playing,
    Error,
    Results,
}

/// Outcome of a completed round, emitted for the presentation layer to show
/// as transient feedback. Carries no authoritative state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct { points: u32 },
    Skipped { answer: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub current_word: Option<Word>,
    pub used_originals: HashSet<String>,
    pub round_count: usize,
    pub score: u32,
    pub total_elapsed_secs: f64,
    /// Seconds each round was open when it closed (correct or skipped).
    pub round_times: Vec<f64>,
    pub round_started_at: Option<SystemTime>,
    pub pending_submission: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            current_word: None,
            used_originals: HashSet::new(),
            round_count: 0,
            score: 0,
            total_elapsed_secs: 0.0,
            round_times: Vec::new(),
            round_started_at: None,
            pending_submission: false,
        }
    }
}

/// Points for a correct guess: one point lost per whole elapsed second,
/// floored so a slow-but-correct answer still beats a skip.
pub fn round_points(elapsed_secs: f64) -> u32 {
    let decayed = MAX_ROUND_POINTS as i64 - elapsed_secs.floor() as i64;
    decayed.max(MIN_ROUND_POINTS as i64) as u32
}

/// Owns the round/session state machine: word rotation, timing, scoring and
/// the single-flight guard against re-entrant transitions.
#[derive(Debug)]
pub struct SessionEngine {
    source: WordSource,
    total_rounds: usize,
    pub state: SessionState,
}

impl SessionEngine {
    /// `total_rounds` must fit in the vocabulary; rejecting it here keeps
    /// every later per-round draw from exhausting the word list.
    pub fn new(source: WordSource, total_rounds: usize) -> Result<Self, WordsError> {
        if total_rounds == 0 || total_rounds > source.vocabulary_size() {
            return Err(WordsError::ExhaustedVocabulary);
        }

        Ok(Self {
            source,
            total_rounds,
            state: SessionState::default(),
        })
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    /// Starts a fresh session, replacing any previous state wholesale, and
    /// opens round one.
    pub fn start(&mut self) -> Result<(), WordsError> {
        let mut state = SessionState::default();

        let word = self.source.pick_next(&state.used_originals)?;
        state.used_originals.insert(word.original.clone());
        state.current_word = Some(word);
        state.round_count = 1;
        state.round_started_at = Some(SystemTime::now());
        state.phase = Phase::Playing;

        self.state = state;
        Ok(())
    }

    /// Checks `text` against the current word. A correct guess scores and
    /// advances the round; a wrong one flips to the `Error` phase without
    /// touching the round or its clock. No-op while a transition is in
    /// flight or no round is active.
    pub fn submit_guess(&mut self, text: &str) -> Result<Option<RoundOutcome>, WordsError> {
        if self.state.pending_submission || !self.round_active() {
            return Ok(None);
        }
        let Some(current) = self.state.current_word.clone() else {
            return Ok(None);
        };

        self.state.pending_submission = true;
        let elapsed = self.accumulate_elapsed();

        let guess = text.trim().to_lowercase();
        if guess == current.original.to_lowercase() {
            let points = round_points(elapsed);
            self.state.score += points;
            self.state.round_times.push(elapsed);
            self.advance_round()?;
            Ok(Some(RoundOutcome::Correct { points }))
        } else {
            self.state.phase = Phase::Error;
            self.state.pending_submission = false;
            Ok(None)
        }
    }

    /// Gives up on the current word: the round's elapsed time still counts,
    /// no points are earned. No-op under the same guards as `submit_guess`.
    pub fn skip(&mut self) -> Result<Option<RoundOutcome>, WordsError> {
        if self.state.pending_submission || !self.round_active() {
            return Ok(None);
        }
        let Some(current) = self.state.current_word.clone() else {
            return Ok(None);
        };

        self.state.pending_submission = true;
        let elapsed = self.accumulate_elapsed();
        self.state.round_times.push(elapsed);
        self.advance_round()?;
        Ok(Some(RoundOutcome::Skipped {
            answer: current.original,
        }))
    }

    /// Swaps the current word's scrambled form for a fresh permutation.
    /// Timing, score and round count are untouched.
    pub fn reshuffle_current(&mut self) {
        if self.state.pending_submission || !self.round_active() {
            return;
        }
        if let Some(current) = &self.state.current_word {
            self.state.current_word = Some(self.source.reshuffle(current));
        }
    }

    /// The player edited their guess; dismisses wrong-guess feedback. The
    /// round clock is deliberately not reset.
    pub fn input_changed(&mut self) {
        if self.state.phase == Phase::Error {
            self.state.phase = Phase::Playing;
        }
    }

    /// Whole seconds the current round has been open, for the display
    /// timer. Observational only.
    pub fn display_seconds(&self) -> u64 {
        match (self.state.phase, self.state.round_started_at) {
            (Phase::Playing | Phase::Error, Some(started_at)) => {
                started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn round_active(&self) -> bool {
        matches!(self.state.phase, Phase::Playing | Phase::Error)
            && self.state.round_started_at.is_some()
    }

    fn accumulate_elapsed(&mut self) -> f64 {
        let elapsed = self
            .state
            .round_started_at
            .and_then(|started_at| started_at.elapsed().ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        self.state.total_elapsed_secs += elapsed;
        elapsed
    }

    fn advance_round(&mut self) -> Result<(), WordsError> {
        if self.state.round_count < self.total_rounds {
            let word = self.source.pick_next(&self.state.used_originals)?;
            self.state.used_originals.insert(word.original.clone());
            self.state.current_word = Some(word);
            self.state.round_count += 1;
            self.state.round_started_at = Some(SystemTime::now());
            self.state.phase = Phase::Playing;
        } else {
            // current_word stays as the last word played; the UI never
            // renders it once the session is over
            self.state.round_started_at = None;
            self.state.phase = Phase::Results;
        }
        self.state.pending_submission = false;
        Ok(())
    }
}
