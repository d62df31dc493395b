//! Interval questions: the 13 named interval sizes and their generator

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pitch::{Pitch, PitchCatalog, PITCH_LOWER_BOUND, PITCH_UPPER_BOUND};

/// The 13 named interval sizes, unison through octave.
///
/// Declaration order is semitone order; difficulty roughly scales with
/// distance, so callers may rely on the ordering for curriculum purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntervalSize {
    Unison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    Tritone,
    PerfectFifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
}

impl IntervalSize {
    /// All sizes in semitone order.
    pub const ALL: [IntervalSize; 13] = [
        IntervalSize::Unison,
        IntervalSize::MinorSecond,
        IntervalSize::MajorSecond,
        IntervalSize::MinorThird,
        IntervalSize::MajorThird,
        IntervalSize::PerfectFourth,
        IntervalSize::Tritone,
        IntervalSize::PerfectFifth,
        IntervalSize::MinorSixth,
        IntervalSize::MajorSixth,
        IntervalSize::MinorSeventh,
        IntervalSize::MajorSeventh,
        IntervalSize::Octave,
    ];

    /// Distance in semitones (unison = 0, octave = 12).
    pub fn semitones(self) -> u8 {
        self as u8
    }

    /// Canonical spoken name. Total over all variants; adding a variant
    /// without extending this match is a compile error.
    pub fn name(self) -> &'static str {
        match self {
            IntervalSize::Unison => "unison",
            IntervalSize::MinorSecond => "minor second",
            IntervalSize::MajorSecond => "major second",
            IntervalSize::MinorThird => "minor third",
            IntervalSize::MajorThird => "major third",
            IntervalSize::PerfectFourth => "perfect fourth",
            IntervalSize::Tritone => "tritone",
            IntervalSize::PerfectFifth => "perfect fifth",
            IntervalSize::MinorSixth => "minor sixth",
            IntervalSize::MajorSixth => "major sixth",
            IntervalSize::MinorSeventh => "minor seventh",
            IntervalSize::MajorSeventh => "major seventh",
            IntervalSize::Octave => "octave",
        }
    }

    /// Parse a normalized spoken name, case-insensitively.
    ///
    /// Exact match against the canonical names only; anything else is `None`
    /// and counts as a plain mismatch during validation.
    pub fn from_name(spoken: &str) -> Option<Self> {
        let spoken = spoken.trim();
        Self::ALL
            .into_iter()
            .find(|size| spoken.eq_ignore_ascii_case(size.name()))
    }
}

/// A generated interval question, held in session state until answered
/// or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalQuestion {
    pub size: IntervalSize,
    pub lower_pitch: Pitch,
    pub upper_pitch: Pitch,
    /// Whether the upper pitch is played first. Fixed at generation time and
    /// preserved exactly on every re-prompt.
    pub presented_descending: bool,
}

impl IntervalQuestion {
    /// Audio cue URLs in presentation order.
    pub fn cues(&self, catalog: &PitchCatalog) -> Vec<String> {
        if self.presented_descending {
            vec![catalog.url(self.upper_pitch), catalog.url(self.lower_pitch)]
        } else {
            vec![catalog.url(self.lower_pitch), catalog.url(self.upper_pitch)]
        }
    }
}

/// Generate a random interval question.
///
/// The lower pitch is drawn from `[PITCH_LOWER_BOUND, PITCH_UPPER_BOUND - size]`
/// so the upper pitch can never leave the playable range; there is no
/// generate-then-reject loop. The range is never empty since the largest
/// size (12) is smaller than the width of the playable range (23).
pub fn generate_interval<R: Rng>(rng: &mut R) -> IntervalQuestion {
    let size = IntervalSize::ALL[rng.gen_range(0..IntervalSize::ALL.len())];
    let semitones = size.semitones();

    let lower = rng.gen_range(PITCH_LOWER_BOUND..=PITCH_UPPER_BOUND - semitones);
    let upper = lower + semitones;

    IntervalQuestion {
        size,
        lower_pitch: Pitch::from_index_unchecked(lower),
        upper_pitch: Pitch::from_index_unchecked(upper),
        presented_descending: rng.gen_bool(0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_intervals_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(0x1057);
        for _ in 0..10_000 {
            let q = generate_interval(&mut rng);
            assert!(q.lower_pitch.index() >= PITCH_LOWER_BOUND);
            assert!(q.upper_pitch.index() <= PITCH_UPPER_BOUND);
            assert_eq!(
                q.upper_pitch.index() - q.lower_pitch.index(),
                q.size.semitones()
            );
        }
    }

    #[test]
    fn test_all_sizes_and_both_directions_occur() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        let (mut asc, mut desc) = (0u32, 0u32);
        for _ in 0..10_000 {
            let q = generate_interval(&mut rng);
            seen.insert(q.size);
            if q.presented_descending {
                desc += 1;
            } else {
                asc += 1;
            }
        }
        assert_eq!(seen.len(), 13);
        assert!(asc > 0 && desc > 0);
    }

    #[test]
    fn test_name_round_trip() {
        for size in IntervalSize::ALL {
            assert_eq!(IntervalSize::from_name(size.name()), Some(size));
        }
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(
            IntervalSize::from_name("Major Third"),
            Some(IntervalSize::MajorThird)
        );
        assert_eq!(
            IntervalSize::from_name("  TRITONE "),
            Some(IntervalSize::Tritone)
        );
        assert_eq!(IntervalSize::from_name("augmented fourth"), None);
        assert_eq!(IntervalSize::from_name(""), None);
    }

    #[test]
    fn test_cue_order_follows_direction() {
        let catalog = PitchCatalog::default();
        let q = IntervalQuestion {
            size: IntervalSize::PerfectFifth,
            lower_pitch: Pitch::new(60).unwrap(),
            upper_pitch: Pitch::new(67).unwrap(),
            presented_descending: false,
        };
        assert_eq!(
            q.cues(&catalog),
            vec![
                catalog.url(q.lower_pitch),
                catalog.url(q.upper_pitch)
            ]
        );

        let flipped = IntervalQuestion {
            presented_descending: true,
            ..q
        };
        assert_eq!(
            flipped.cues(&catalog),
            vec![
                catalog.url(q.upper_pitch),
                catalog.url(q.lower_pitch)
            ]
        );
    }
}
