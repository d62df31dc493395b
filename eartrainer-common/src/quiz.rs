//! The four quiz operations and the per-question attempt tracker
//!
//! Generation overwrites the session's pending question and resets the miss
//! counter; validation compares a spoken answer against the pending question
//! and decides between re-prompting with the same cues and revealing the
//! canonical answer. All state travels in the caller-supplied
//! [`SessionState`].

use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::interval::{generate_interval, IntervalSize};
use crate::pitch::PitchCatalog;
use crate::session::{Question, SessionState};
use crate::triad::{generate_triad, TriadInversion, TriadQuality};

/// Consecutive misses allowed before the answer is revealed.
pub const ATTEMPT_LIMIT: u32 = 3;

/// What the caller renders after a question is generated: cue URLs in
/// presentation order plus platform-neutral text fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub cues: Vec<String>,
    /// Spoken before the cues, e.g. "Here is the interval"
    pub lead_in: String,
    /// Fallback re-prompt if the user stays silent
    pub reprompt: String,
}

/// Outcome of validating one spoken answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Answer matched; terminal for this question, counter untouched
    Correct { name: String },
    /// Miss below the attempt limit; replay the same cues in the same order
    IncorrectRetry { cues: Vec<String> },
    /// Attempt limit reached; replay the cues and disclose the answer.
    /// Terminal: further misses on the same question repeat this verdict.
    IncorrectRevealed { cues: Vec<String>, answer: String },
}

/// Generate a fresh interval question into the session.
///
/// Always resets `incorrect_attempts` to 0, whatever its prior value.
pub fn start_interval<R: Rng>(
    session: &mut SessionState,
    rng: &mut R,
    catalog: &PitchCatalog,
) -> Prompt {
    let question = generate_interval(rng);
    debug!(?question, "generated interval question");

    let cues = question.cues(catalog);
    session.last_question = Some(Question::Interval(question));
    session.incorrect_attempts = 0;

    Prompt {
        cues,
        lead_in: "Here is the interval".to_string(),
        reprompt: "Please say the interval you heard".to_string(),
    }
}

/// Generate a fresh triad question into the session.
///
/// Always resets `incorrect_attempts` to 0, whatever its prior value.
pub fn start_triad<R: Rng>(
    session: &mut SessionState,
    rng: &mut R,
    catalog: &PitchCatalog,
) -> Prompt {
    let question = generate_triad(rng);
    debug!(?question, "generated triad question");

    let cues = question.cues(catalog);
    session.last_question = Some(Question::Triad(question));
    session.incorrect_attempts = 0;

    Prompt {
        cues,
        lead_in: "Here is the triad".to_string(),
        reprompt: "Please say the quality and inversion of the triad you heard".to_string(),
    }
}

/// Validate a spoken interval name against the pending interval question.
///
/// A spoken value matching no canonical interval name is an ordinary miss,
/// not an error. Fails with [`Error::NoActiveQuestion`] if nothing has been
/// generated and [`Error::WrongQuestionKind`] if a triad is pending.
pub fn answer_interval(
    session: &mut SessionState,
    spoken: &str,
    catalog: &PitchCatalog,
) -> Result<Verdict> {
    let question = match session.last_question {
        Some(Question::Interval(q)) => q,
        Some(ref other) => {
            return Err(Error::WrongQuestionKind {
                given: "interval",
                pending: other.kind(),
            })
        }
        None => return Err(Error::NoActiveQuestion),
    };

    let matched = IntervalSize::from_name(spoken) == Some(question.size);
    debug!(spoken, matched, "validated interval answer");

    Ok(judge(
        session,
        matched,
        question.cues(catalog),
        question.size.name().to_string(),
    ))
}

/// Validate spoken quality and inversion against the pending triad question.
///
/// Both parts must independently match; correct quality with wrong inversion
/// is a full miss. Error cases mirror [`answer_interval`].
pub fn answer_triad(
    session: &mut SessionState,
    spoken_quality: &str,
    spoken_inversion: &str,
    catalog: &PitchCatalog,
) -> Result<Verdict> {
    let question = match session.last_question {
        Some(Question::Triad(q)) => q,
        Some(ref other) => {
            return Err(Error::WrongQuestionKind {
                given: "triad",
                pending: other.kind(),
            })
        }
        None => return Err(Error::NoActiveQuestion),
    };

    let quality_matched = TriadQuality::from_name(spoken_quality) == Some(question.quality);
    let inversion_matched =
        TriadInversion::from_name(spoken_inversion) == Some(question.inversion);
    let matched = quality_matched && inversion_matched;
    debug!(
        spoken_quality,
        spoken_inversion, matched, "validated triad answer"
    );

    Ok(judge(
        session,
        matched,
        question.cues(catalog),
        question.answer_name(),
    ))
}

/// Advance the attempt state machine for one validation outcome.
///
/// The counter saturates at [`ATTEMPT_LIMIT`]; once a question is revealed,
/// repeated misses keep revealing without incrementing further.
fn judge(session: &mut SessionState, matched: bool, cues: Vec<String>, answer: String) -> Verdict {
    if matched {
        return Verdict::Correct { name: answer };
    }

    if session.incorrect_attempts < ATTEMPT_LIMIT {
        session.incorrect_attempts += 1;
    }

    if session.incorrect_attempts >= ATTEMPT_LIMIT {
        Verdict::IncorrectRevealed { cues, answer }
    } else {
        Verdict::IncorrectRetry { cues }
    }
}
