//! Conversational-platform fulfillment endpoint
//!
//! Receives the platform's webhook request (normalized action name, slot
//! parameters, session contexts), dispatches to the quiz engine, and renders
//! the result as SSML. Session state is serialized into an output context and
//! recovered from the echoed contexts on the next turn, so the service stays
//! stateless across sessions.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use eartrainer_common::quiz::{self, Prompt, Verdict};
use eartrainer_common::{Error, SessionState};

use crate::AppState;

// Action names the platform sends after intent matching
pub const RANDOM_INTERVAL_ACTION: &str = "random_interval";
pub const VALIDATE_INTERVAL_ACTION: &str = "validate_interval";
pub const RANDOM_TRIAD_ACTION: &str = "random_triad";
pub const VALIDATE_TRIAD_ACTION: &str = "validate_triad";

// Slot parameter names
const INTERVAL_ARG: &str = "interval";
const QUALITY_ARG: &str = "quality";
const INVERSION_ARG: &str = "inversion";

// Conversation-flow contexts consumed by the platform's intent matching
const INTERVAL_PLAYED_CONTEXT: &str = "interval-played";
const TRIAD_PLAYED_CONTEXT: &str = "triad-played";
const INSTRUCTED_ABOUT_PRACTICE_CONTEXT: &str = "instructed-about-practice";

// Carrier context for the serialized session state
const SESSION_CONTEXT: &str = "eartrainer-session";
const SESSION_STATE_PARAM: &str = "quiz_state";

const HELP_TEXT: &str = "Say, give me an interval, or, give me a triad, to practice.";

/// Incoming fulfillment request (the fields this service reads)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRequest {
    #[serde(default)]
    pub session_id: String,
    pub result: RequestResult,
}

/// The intent-matching result inside a fulfillment request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestResult {
    pub action: String,
    pub parameters: serde_json::Map<String, Value>,
    pub contexts: Vec<Context>,
}

/// A platform session context; the platform echoes active contexts back on
/// the next turn, which is how session state survives between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub lifespan: u32,
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

/// Outgoing fulfillment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResponse {
    /// SSML speech
    pub speech: String,
    pub display_text: String,
    pub context_out: Vec<Context>,
}

/// Per-question-kind rendering details
struct Rendering {
    /// "interval" or "triad", as spoken to the user
    noun: &'static str,
    /// Context that keeps the platform routing answers to the validate intent
    played_context: &'static str,
    reprompt: &'static str,
}

const INTERVAL_RENDERING: Rendering = Rendering {
    noun: "interval",
    played_context: INTERVAL_PLAYED_CONTEXT,
    reprompt: "Please say the interval you heard",
};

const TRIAD_RENDERING: Rendering = Rendering {
    noun: "triad",
    played_context: TRIAD_PLAYED_CONTEXT,
    reprompt: "Please say the quality and inversion of the triad you heard",
};

/// POST /
///
/// The single fulfillment endpoint. Always returns HTTP 200 with a
/// well-formed speech response, per platform convention; quiz errors become
/// re-prompts, never failures.
pub async fn handle_fulfillment(
    State(state): State<AppState>,
    Json(request): Json<FulfillmentRequest>,
) -> Json<FulfillmentResponse> {
    debug!(
        session_id = %request.session_id,
        action = %request.result.action,
        "fulfillment request"
    );

    let mut session = recover_session(&request.result.contexts);
    let catalog = &state.catalog;
    let mut rng = rand::thread_rng();

    let response = match request.result.action.as_str() {
        RANDOM_INTERVAL_ACTION => {
            let prompt = quiz::start_interval(&mut session, &mut rng, catalog);
            question_response(&session, &prompt, &INTERVAL_RENDERING)
        }
        RANDOM_TRIAD_ACTION => {
            let prompt = quiz::start_triad(&mut session, &mut rng, catalog);
            question_response(&session, &prompt, &TRIAD_RENDERING)
        }
        VALIDATE_INTERVAL_ACTION => {
            let spoken = str_param(&request.result.parameters, INTERVAL_ARG);
            match quiz::answer_interval(&mut session, spoken, catalog) {
                Ok(verdict) => verdict_response(&session, verdict, &INTERVAL_RENDERING),
                Err(err) => error_response(&session, err),
            }
        }
        VALIDATE_TRIAD_ACTION => {
            let quality = str_param(&request.result.parameters, QUALITY_ARG);
            let inversion = str_param(&request.result.parameters, INVERSION_ARG);
            match quiz::answer_triad(&mut session, quality, inversion, catalog) {
                Ok(verdict) => verdict_response(&session, verdict, &TRIAD_RENDERING),
                Err(err) => error_response(&session, err),
            }
        }
        other => {
            warn!(action = %other, "unknown fulfillment action");
            plain_response(
                &session,
                HELP_TEXT,
                HELP_TEXT,
                INSTRUCTED_ABOUT_PRACTICE_CONTEXT,
            )
        }
    };

    Json(response)
}

/// Render a freshly generated question.
fn question_response(
    session: &SessionState,
    prompt: &Prompt,
    rendering: &Rendering,
) -> FulfillmentResponse {
    FulfillmentResponse {
        speech: ssml(&prompt.lead_in, &prompt.cues, ""),
        display_text: prompt.reprompt.clone(),
        context_out: vec![
            named_context(rendering.played_context),
            session_context(session),
        ],
    }
}

/// Render a validation verdict.
fn verdict_response(
    session: &SessionState,
    verdict: Verdict,
    rendering: &Rendering,
) -> FulfillmentResponse {
    match verdict {
        Verdict::Correct { name } => {
            let text = format!(
                "You are correct, the {} is a {}. Ready for another one?",
                rendering.noun, name
            );
            plain_response(session, &text, &text, INSTRUCTED_ABOUT_PRACTICE_CONTEXT)
        }
        Verdict::IncorrectRetry { cues } => FulfillmentResponse {
            speech: ssml(
                &format!(
                    "Sorry, but that is incorrect. Here is the {} again",
                    rendering.noun
                ),
                &cues,
                "",
            ),
            display_text: rendering.reprompt.to_string(),
            context_out: vec![
                named_context(rendering.played_context),
                session_context(session),
            ],
        },
        Verdict::IncorrectRevealed { cues, answer } => FulfillmentResponse {
            speech: ssml(
                &format!(
                    "Sorry, but that is incorrect. The {} was a {}. Here it is one more time",
                    rendering.noun, answer
                ),
                &cues,
                "Ready for another one?",
            ),
            display_text: format!("The {} was a {}.", rendering.noun, answer),
            context_out: vec![
                named_context(INSTRUCTED_ABOUT_PRACTICE_CONTEXT),
                session_context(session),
            ],
        },
    }
}

/// Render a quiz error as a re-prompt. No error is fatal to the conversation.
fn error_response(session: &SessionState, err: Error) -> FulfillmentResponse {
    let text = match err {
        Error::NoActiveQuestion => {
            format!("I haven't played anything yet. {}", HELP_TEXT)
        }
        Error::WrongQuestionKind { pending, .. } => format!(
            "I was waiting for the answer to a {} question. {}",
            pending, HELP_TEXT
        ),
        other => {
            warn!(error = %other, "unexpected quiz error");
            format!("Something went wrong on my end. {}", HELP_TEXT)
        }
    };
    plain_response(session, &text, &text, INSTRUCTED_ABOUT_PRACTICE_CONTEXT)
}

/// Speech-only response with a single flow context plus the session carrier.
fn plain_response(
    session: &SessionState,
    text: &str,
    display_text: &str,
    flow_context: &str,
) -> FulfillmentResponse {
    FulfillmentResponse {
        speech: format!("<speak>{}</speak>", text),
        display_text: display_text.to_string(),
        context_out: vec![named_context(flow_context), session_context(session)],
    }
}

/// Assemble SSML: lead-in text, one audio tag per cue in order, optional tail.
fn ssml(lead_in: &str, cues: &[String], tail: &str) -> String {
    let mut speech = format!("<speak>{}", lead_in);
    for url in cues {
        speech.push_str(&format!(" <audio src='{}'/>", url));
    }
    if !tail.is_empty() {
        speech.push(' ');
        speech.push_str(tail);
    }
    speech.push_str("</speak>");
    speech
}

/// Recover the session state carried in the request contexts.
///
/// Absent or unreadable state starts a fresh session; the quiz engine then
/// reports `NoActiveQuestion` on validation rather than guessing.
fn recover_session(contexts: &[Context]) -> SessionState {
    let Some(carrier) = contexts
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(SESSION_CONTEXT))
    else {
        return SessionState::default();
    };

    match carrier.parameters.get(SESSION_STATE_PARAM) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "unreadable session state, starting fresh");
            SessionState::default()
        }),
        None => SessionState::default(),
    }
}

/// Build the output context that carries the session state to the next turn.
fn session_context(session: &SessionState) -> Context {
    let mut parameters = serde_json::Map::new();
    match serde_json::to_value(session) {
        Ok(value) => {
            parameters.insert(SESSION_STATE_PARAM.to_string(), value);
        }
        Err(e) => {
            // Enums and integers only; serialization cannot realistically fail
            warn!(error = %e, "failed to serialize session state");
        }
    }
    Context {
        name: SESSION_CONTEXT.to_string(),
        lifespan: 50,
        parameters,
    }
}

/// A bare flow context for the platform's intent matching.
fn named_context(name: &str) -> Context {
    Context {
        name: name.to_string(),
        lifespan: 5,
        parameters: serde_json::Map::new(),
    }
}

/// Read a string slot parameter, treating absence as empty (a plain mismatch).
fn str_param<'a>(parameters: &'a serde_json::Map<String, Value>, key: &str) -> &'a str {
    parameters.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssml_assembly() {
        let cues = vec!["http://a/1.wav".to_string(), "http://a/2.wav".to_string()];
        assert_eq!(
            ssml("Here is the interval", &cues, ""),
            "<speak>Here is the interval <audio src='http://a/1.wav'/> \
             <audio src='http://a/2.wav'/></speak>"
        );
        assert_eq!(
            ssml("The answer", &cues[..1], "Ready?"),
            "<speak>The answer <audio src='http://a/1.wav'/> Ready?</speak>"
        );
    }

    #[test]
    fn test_session_round_trip_through_context() {
        let session = SessionState {
            last_question: None,
            incorrect_attempts: 2,
        };
        let carrier = session_context(&session);
        assert_eq!(recover_session(&[carrier]), session);
    }

    #[test]
    fn test_recover_session_tolerates_garbage() {
        let mut parameters = serde_json::Map::new();
        parameters.insert(
            SESSION_STATE_PARAM.to_string(),
            Value::String("not a session".to_string()),
        );
        let carrier = Context {
            name: SESSION_CONTEXT.to_string(),
            lifespan: 50,
            parameters,
        };
        assert_eq!(recover_session(&[carrier]), SessionState::default());
        assert_eq!(recover_session(&[]), SessionState::default());
    }
}
