use crate::engine::RoundOutcome;

/// Runtime ticks a feedback message stays visible (~1.5s at the 250ms tick).
pub const FEEDBACK_TICKS: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct { points: u32 },
    Skipped { answer: String },
    Incorrect,
}

impl FeedbackKind {
    pub fn message(&self) -> String {
        match self {
            FeedbackKind::Correct { points } => format!("Correct! You earned {points} points."),
            FeedbackKind::Skipped { answer } => format!("Skipped! The word was \"{answer}\"."),
            FeedbackKind::Incorrect => "That's not the word. Keep trying or skip!".to_string(),
        }
    }
}

impl From<RoundOutcome> for FeedbackKind {
    fn from(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::Correct { points } => FeedbackKind::Correct { points },
            RoundOutcome::Skipped { answer } => FeedbackKind::Skipped { answer },
        }
    }
}

/// Tick-expiring toast for the engine's outbound notifications. Purely
/// presentational; holds no game state.
#[derive(Debug, Default)]
pub struct Feedback {
    current: Option<(FeedbackKind, u8)>,
}

impl Feedback {
    pub fn show(&mut self, kind: FeedbackKind) {
        self.current = Some((kind, FEEDBACK_TICKS));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn on_tick(&mut self) {
        if let Some((_, ticks_left)) = &mut self.current {
            *ticks_left -= 1;
            if *ticks_left == 0 {
                self.current = None;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn kind(&self) -> Option<&FeedbackKind> {
        self.current.as_ref().map(|(kind, _)| kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_show_and_expire() {
        let mut feedback = Feedback::default();
        assert!(!feedback.is_active());

        feedback.show(FeedbackKind::Correct { points: 98 });
        assert!(feedback.is_active());

        for _ in 0..FEEDBACK_TICKS {
            feedback.on_tick();
        }
        assert!(!feedback.is_active());
        assert_eq!(feedback.kind(), None);
    }

    #[test]
    fn test_show_resets_lifetime() {
        let mut feedback = Feedback::default();
        feedback.show(FeedbackKind::Incorrect);
        feedback.on_tick();
        feedback.show(FeedbackKind::Incorrect);

        for _ in 0..(FEEDBACK_TICKS - 1) {
            feedback.on_tick();
        }
        assert!(feedback.is_active());
        feedback.on_tick();
        assert!(!feedback.is_active());
    }

    #[test]
    fn test_tick_without_feedback_is_noop() {
        let mut feedback = Feedback::default();
        feedback.on_tick();
        assert!(!feedback.is_active());
    }

    #[test]
    fn test_clear() {
        let mut feedback = Feedback::default();
        feedback.show(FeedbackKind::Incorrect);
        feedback.clear();
        assert!(!feedback.is_active());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FeedbackKind::Correct { points: 70 }.message(),
            "Correct! You earned 70 points."
        );
        assert_eq!(
            FeedbackKind::Skipped {
                answer: "nebula".to_string()
            }
            .message(),
            "Skipped! The word was \"nebula\"."
        );
        assert!(FeedbackKind::Incorrect.message().contains("not the word"));
    }

    #[test]
    fn test_from_round_outcome() {
        assert_matches!(
            FeedbackKind::from(RoundOutcome::Correct { points: 10 }),
            FeedbackKind::Correct { points: 10 }
        );
        assert_matches!(
            FeedbackKind::from(RoundOutcome::Skipped {
                answer: "cat".to_string()
            }),
            FeedbackKind::Skipped { answer } if answer == "cat"
        );
    }
}
