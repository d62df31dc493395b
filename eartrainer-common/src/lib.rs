//! # Eartrainer Common Library
//!
//! Core quiz engine shared by the eartrainer services:
//! - Pitch catalog (playable range, audio URL mapping)
//! - Interval and triad question generators
//! - Answer validation and the per-question attempt tracker
//! - Session state carried by the conversational layer between turns
//!
//! Everything here is pure computation over an explicit `SessionState`;
//! HTTP and platform plumbing live in the service crates.

pub mod error;
pub mod interval;
pub mod pitch;
pub mod quiz;
pub mod session;
pub mod triad;

pub use error::{Error, Result};
pub use pitch::{Pitch, PitchCatalog};
pub use quiz::{Prompt, Verdict, ATTEMPT_LIMIT};
pub use session::{Question, SessionState};
