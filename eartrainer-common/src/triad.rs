//! Triad questions: quality, inversion, the fixed voicing table, and
//! their generator

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pitch::{Pitch, PitchCatalog, PITCH_LOWER_BOUND, PITCH_UPPER_BOUND};

/// Triad quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl TriadQuality {
    pub const ALL: [TriadQuality; 4] = [
        TriadQuality::Major,
        TriadQuality::Minor,
        TriadQuality::Diminished,
        TriadQuality::Augmented,
    ];

    /// Canonical spoken name.
    pub fn name(self) -> &'static str {
        match self {
            TriadQuality::Major => "major",
            TriadQuality::Minor => "minor",
            TriadQuality::Diminished => "diminished",
            TriadQuality::Augmented => "augmented",
        }
    }

    /// Parse a normalized spoken name, case-insensitively, exact match only.
    pub fn from_name(spoken: &str) -> Option<Self> {
        let spoken = spoken.trim();
        Self::ALL
            .into_iter()
            .find(|q| spoken.eq_ignore_ascii_case(q.name()))
    }
}

/// Which chord tone is voiced lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriadInversion {
    RootPosition,
    FirstInversion,
    SecondInversion,
}

impl TriadInversion {
    pub const ALL: [TriadInversion; 3] = [
        TriadInversion::RootPosition,
        TriadInversion::FirstInversion,
        TriadInversion::SecondInversion,
    ];

    /// Canonical spoken name.
    pub fn name(self) -> &'static str {
        match self {
            TriadInversion::RootPosition => "root position",
            TriadInversion::FirstInversion => "first inversion",
            TriadInversion::SecondInversion => "second inversion",
        }
    }

    /// Parse a normalized spoken name, case-insensitively, exact match only.
    pub fn from_name(spoken: &str) -> Option<Self> {
        let spoken = spoken.trim();
        Self::ALL
            .into_iter()
            .find(|inv| spoken.eq_ignore_ascii_case(inv.name()))
    }
}

/// Semitone offsets of the middle and upper voice above the lowest pitch,
/// for each (quality, inversion) voicing.
///
/// An augmented triad is a stack of two major thirds, so every inversion
/// collapses to the same (4, 8) shape; the inversion is intentionally
/// immaterial there. The upper offset is always the larger of the pair.
pub fn voicing_offsets(quality: TriadQuality, inversion: TriadInversion) -> (u8, u8) {
    use TriadInversion::*;
    use TriadQuality::*;
    match (quality, inversion) {
        (Major, RootPosition) => (4, 7),
        (Major, FirstInversion) => (3, 8),
        (Major, SecondInversion) => (5, 9),
        (Minor, RootPosition) => (3, 7),
        (Minor, FirstInversion) => (4, 9),
        (Minor, SecondInversion) => (4, 8),
        (Diminished, RootPosition) => (3, 6),
        (Diminished, FirstInversion) => (3, 9),
        (Diminished, SecondInversion) => (6, 9),
        (Augmented, _) => (4, 8),
    }
}

/// A generated triad question, held in session state until answered or
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriadQuestion {
    pub quality: TriadQuality,
    pub inversion: TriadInversion,
    pub lower_pitch: Pitch,
    pub middle_pitch: Pitch,
    pub upper_pitch: Pitch,
}

impl TriadQuestion {
    /// Audio cue URLs, always lowest first.
    pub fn cues(&self, catalog: &PitchCatalog) -> Vec<String> {
        vec![
            catalog.url(self.lower_pitch),
            catalog.url(self.middle_pitch),
            catalog.url(self.upper_pitch),
        ]
    }

    /// Canonical answer as a single phrase, e.g. "minor in first inversion".
    pub fn answer_name(&self) -> String {
        format!("{} in {}", self.quality.name(), self.inversion.name())
    }
}

/// Generate a random triad question.
///
/// The lowest pitch is drawn from `[PITCH_LOWER_BOUND, PITCH_UPPER_BOUND -
/// upper_offset]`, so both derived voices stay in the playable range without
/// a generate-then-reject loop.
pub fn generate_triad<R: Rng>(rng: &mut R) -> TriadQuestion {
    let quality = TriadQuality::ALL[rng.gen_range(0..TriadQuality::ALL.len())];
    let inversion = TriadInversion::ALL[rng.gen_range(0..TriadInversion::ALL.len())];
    let (middle_offset, upper_offset) = voicing_offsets(quality, inversion);

    let lower = rng.gen_range(PITCH_LOWER_BOUND..=PITCH_UPPER_BOUND - upper_offset);

    TriadQuestion {
        quality,
        inversion,
        lower_pitch: Pitch::from_index_unchecked(lower),
        middle_pitch: Pitch::from_index_unchecked(lower + middle_offset),
        upper_pitch: Pitch::from_index_unchecked(lower + upper_offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_voicing_table_exact_values() {
        use TriadInversion::*;
        use TriadQuality::*;
        assert_eq!(voicing_offsets(Major, RootPosition), (4, 7));
        assert_eq!(voicing_offsets(Major, FirstInversion), (3, 8));
        assert_eq!(voicing_offsets(Major, SecondInversion), (5, 9));
        assert_eq!(voicing_offsets(Minor, RootPosition), (3, 7));
        assert_eq!(voicing_offsets(Minor, FirstInversion), (4, 9));
        assert_eq!(voicing_offsets(Minor, SecondInversion), (4, 8));
        assert_eq!(voicing_offsets(Diminished, RootPosition), (3, 6));
        assert_eq!(voicing_offsets(Diminished, FirstInversion), (3, 9));
        assert_eq!(voicing_offsets(Diminished, SecondInversion), (6, 9));
    }

    #[test]
    fn test_augmented_ignores_inversion() {
        for inversion in TriadInversion::ALL {
            assert_eq!(voicing_offsets(TriadQuality::Augmented, inversion), (4, 8));
        }
    }

    #[test]
    fn test_upper_offset_is_always_the_larger() {
        for quality in TriadQuality::ALL {
            for inversion in TriadInversion::ALL {
                let (middle, upper) = voicing_offsets(quality, inversion);
                assert!(middle < upper, "{:?}/{:?}", quality, inversion);
            }
        }
    }

    #[test]
    fn test_generated_triads_stay_in_range_and_ordered() {
        let mut rng = StdRng::seed_from_u64(0x7214);
        for _ in 0..10_000 {
            let q = generate_triad(&mut rng);
            assert!(q.lower_pitch.index() >= PITCH_LOWER_BOUND);
            assert!(q.upper_pitch.index() <= PITCH_UPPER_BOUND);
            assert!(q.lower_pitch <= q.middle_pitch);
            assert!(q.middle_pitch <= q.upper_pitch);

            let (middle_offset, upper_offset) = voicing_offsets(q.quality, q.inversion);
            assert_eq!(
                q.middle_pitch.index() - q.lower_pitch.index(),
                middle_offset
            );
            assert_eq!(q.upper_pitch.index() - q.lower_pitch.index(), upper_offset);
        }
    }

    #[test]
    fn test_all_qualities_and_inversions_occur() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut qualities = std::collections::HashSet::new();
        let mut inversions = std::collections::HashSet::new();
        for _ in 0..10_000 {
            let q = generate_triad(&mut rng);
            qualities.insert(q.quality);
            inversions.insert(q.inversion);
        }
        assert_eq!(qualities.len(), 4);
        assert_eq!(inversions.len(), 3);
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!(
            TriadQuality::from_name("Diminished"),
            Some(TriadQuality::Diminished)
        );
        assert_eq!(
            TriadInversion::from_name("SECOND INVERSION"),
            Some(TriadInversion::SecondInversion)
        );
        assert_eq!(TriadQuality::from_name("half-diminished"), None);
        assert_eq!(TriadInversion::from_name("third inversion"), None);
    }
}
