//! Playable pitch range and the pitch-to-audio-file catalog
//!
//! Pitches are linear indices on the chromatic scale (MIDI numbering).
//! The hosted sound files are numbered lower than their MIDI values by a
//! fixed offset, so the catalog subtracts it when building URLs.

use serde::{Deserialize, Serialize};

/// MIDI note number of the lowest note that can be played
pub const PITCH_LOWER_BOUND: u8 = 55;

/// MIDI note number of the highest note that can be played
pub const PITCH_UPPER_BOUND: u8 = 78;

/// Offset from filenames in the sound files to MIDI values
pub const PITCH_OFFSET: u8 = 20;

/// Default location of the hosted note recordings
pub const DEFAULT_AUDIO_BASE_URL: &str = "https://storage.googleapis.com/musicnotes/";

/// A single playable pitch, guaranteed in [`PITCH_LOWER_BOUND`, `PITCH_UPPER_BOUND`]
/// when constructed through [`Pitch::new`] or the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    /// Create a pitch, rejecting indices outside the playable range.
    pub fn new(index: u8) -> Option<Self> {
        if (PITCH_LOWER_BOUND..=PITCH_UPPER_BOUND).contains(&index) {
            Some(Pitch(index))
        } else {
            None
        }
    }

    /// Construct without a range check. Callers must guarantee the index is
    /// playable; the generators do so by bounding their random draws.
    pub(crate) fn from_index_unchecked(index: u8) -> Self {
        debug_assert!((PITCH_LOWER_BOUND..=PITCH_UPPER_BOUND).contains(&index));
        Pitch(index)
    }

    /// The linear (MIDI) pitch index.
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Maps pitches to the URLs of their pre-rendered recordings.
///
/// The mapping is deterministic and injective over the playable range:
/// each pitch yields `{base_url}{index - PITCH_OFFSET}.wav`.
#[derive(Debug, Clone)]
pub struct PitchCatalog {
    base_url: String,
}

impl Default for PitchCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_BASE_URL)
    }
}

impl PitchCatalog {
    /// Create a catalog rooted at `base_url` (must end with `/`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// URL of the recording for `pitch`.
    pub fn url(&self, pitch: Pitch) -> String {
        format!("{}{}.wav", self.base_url, pitch.index() - PITCH_OFFSET)
    }
}
