//! Per-session quiz state
//!
//! The conversational layer owns this state and supplies it on every turn;
//! nothing here is process-wide, so concurrent sessions never interact.
//! The webhook serializes it into a platform context and recovers it from
//! the echoed contexts on the next turn.

use serde::{Deserialize, Serialize};

use crate::interval::IntervalQuestion;
use crate::quiz::ATTEMPT_LIMIT;
use crate::triad::TriadQuestion;

/// The most recently generated question, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    Interval(IntervalQuestion),
    Triad(TriadQuestion),
}

impl Question {
    /// Short label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Question::Interval(_) => "interval",
            Question::Triad(_) => "triad",
        }
    }
}

/// Where the current question stands in the retry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    /// No incorrect answers yet
    AwaitingFirstAnswer,
    /// At least one miss, limit not reached; same cues are replayed
    AwaitingRetry,
    /// Limit reached; the canonical answer has been disclosed
    Revealed,
}

/// Mutable quiz state for one conversation session.
///
/// `incorrect_attempts` is a strict per-question counter: reset to 0 by
/// generation, incremented on each miss, saturating at [`ATTEMPT_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub last_question: Option<Question>,
    #[serde(default)]
    pub incorrect_attempts: u32,
}

impl SessionState {
    pub fn phase(&self) -> AttemptPhase {
        if self.incorrect_attempts == 0 {
            AttemptPhase::AwaitingFirstAnswer
        } else if self.incorrect_attempts < ATTEMPT_LIMIT {
            AttemptPhase::AwaitingRetry
        } else {
            AttemptPhase::Revealed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::generate_interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_session_is_empty() {
        let session = SessionState::default();
        assert_eq!(session.last_question, None);
        assert_eq!(session.incorrect_attempts, 0);
        assert_eq!(session.phase(), AttemptPhase::AwaitingFirstAnswer);
    }

    #[test]
    fn test_phase_thresholds() {
        let mut session = SessionState::default();
        session.incorrect_attempts = 1;
        assert_eq!(session.phase(), AttemptPhase::AwaitingRetry);
        session.incorrect_attempts = ATTEMPT_LIMIT - 1;
        assert_eq!(session.phase(), AttemptPhase::AwaitingRetry);
        session.incorrect_attempts = ATTEMPT_LIMIT;
        assert_eq!(session.phase(), AttemptPhase::Revealed);
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut rng = StdRng::seed_from_u64(99);
        let session = SessionState {
            last_question: Some(Question::Interval(generate_interval(&mut rng))),
            incorrect_attempts: 2,
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_session_tolerates_missing_fields() {
        // A fresh platform context carries no parameters yet
        let back: SessionState = serde_json::from_str("{}").unwrap();
        assert_eq!(back, SessionState::default());
    }
}
