//! Common error types for the eartrainer services

use thiserror::Error;

/// Common result type for eartrainer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the quiz engine can report to its caller.
///
/// Every variant directs the caller to re-prompt the user; none is fatal.
/// An answer that matches no canonical name is a plain mismatch, not an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Validation was invoked before any question was generated in this session
    #[error("No active question in this session")]
    NoActiveQuestion,

    /// Validation kind does not match the pending question
    /// (e.g. an interval answer while a triad is waiting)
    #[error("Answer is for a {given} question but a {pending} question is pending")]
    WrongQuestionKind {
        given: &'static str,
        pending: &'static str,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
