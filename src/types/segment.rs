//! Dartboard segment identities and the segment shape produced by hit sources

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, ScoringError};

/// Category of a board sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SegmentCategory {
    /// Single ring between the bull and the treble ring
    Inner,
    /// Single ring between the treble and double rings
    Outer,
    Double,
    Triple,
    /// Outer bull (25 on the board, scored as 50)
    Bullseye,
    /// Inner bull
    DoubleBullseye,
    /// Anything else a hit source may report
    Other,
    /// The board's reset button, not a dart
    ResetButton,
}

impl SegmentCategory {
    /// Whether a hit in this category may take the score to exactly zero.
    pub fn qualifies_as_out(self) -> bool {
        matches!(
            self,
            SegmentCategory::Double
                | SegmentCategory::Triple
                | SegmentCategory::Bullseye
                | SegmentCategory::DoubleBullseye
        )
    }

    pub fn is_bullseye(self) -> bool {
        matches!(self, SegmentCategory::Bullseye | SegmentCategory::DoubleBullseye)
    }
}

/// Identity of a physical board sector.
///
/// Numbered variants are only meaningful for sectors 1 through 20;
/// [`SegmentId::segment`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SegmentId {
    Inner(u8),
    Outer(u8),
    Double(u8),
    Triple(u8),
    Bull,
    DoubleBull,
    ResetButton,
    /// Not produced by the board; used by harnesses for `Other` hits
    Miss,
}

impl SegmentId {
    /// Highest numbered sector on the board
    pub const MAX_SECTOR: u8 = 20;

    /// Build the canonical segment for this identity.
    pub fn segment(self) -> Result<Segment> {
        let (category, raw_value) = match self {
            SegmentId::Inner(n) => (SegmentCategory::Inner, Self::sector(n)?),
            SegmentId::Outer(n) => (SegmentCategory::Outer, Self::sector(n)?),
            SegmentId::Double(n) => (SegmentCategory::Double, Self::sector(n)? * 2),
            SegmentId::Triple(n) => (SegmentCategory::Triple, Self::sector(n)? * 3),
            SegmentId::Bull => (SegmentCategory::Bullseye, 25),
            SegmentId::DoubleBull => (SegmentCategory::DoubleBullseye, 50),
            SegmentId::ResetButton => (SegmentCategory::ResetButton, 0),
            SegmentId::Miss => (SegmentCategory::Other, 0),
        };

        Ok(Segment::new(self, category, raw_value, self.to_string()))
    }

    fn sector(n: u8) -> Result<u32> {
        if (1..=Self::MAX_SECTOR).contains(&n) {
            Ok(u32::from(n))
        } else {
            Err(ScoringError::InvalidSegment {
                details: format!("sector {} is outside 1..={}", n, Self::MAX_SECTOR),
            })
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentId::Inner(n) => write!(f, "Inner {n}"),
            SegmentId::Outer(n) => write!(f, "Outer {n}"),
            SegmentId::Double(n) => write!(f, "Double {n}"),
            SegmentId::Triple(n) => write!(f, "Triple {n}"),
            SegmentId::Bull => f.write_str("Bull"),
            SegmentId::DoubleBull => f.write_str("Double Bull"),
            SegmentId::ResetButton => f.write_str("Reset"),
            SegmentId::Miss => f.write_str("Miss"),
        }
    }
}

/// One sector hit as reported by a hit source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Segment {
    pub id: SegmentId,
    pub category: SegmentCategory,
    /// Nominal value before normalization (a treble 20 carries 60)
    pub raw_value: u32,
    /// Passed through to the display untouched
    pub display_name: String,
}

impl Segment {
    pub fn new(
        id: SegmentId,
        category: SegmentCategory,
        raw_value: u32,
        display_name: impl Into<String>,
    ) -> Self {
        Self { id, category, raw_value, display_name: display_name.into() }
    }

    pub fn is_reset(&self) -> bool {
        self.category == SegmentCategory::ResetButton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_segments_scale_by_ring() {
        let triple = SegmentId::Triple(20).segment().unwrap();
        assert_eq!(triple.category, SegmentCategory::Triple);
        assert_eq!(triple.raw_value, 60);
        assert_eq!(triple.display_name, "Triple 20");

        assert_eq!(SegmentId::Double(16).segment().unwrap().raw_value, 32);
        assert_eq!(SegmentId::Inner(7).segment().unwrap().raw_value, 7);
        assert_eq!(SegmentId::Outer(7).segment().unwrap().category, SegmentCategory::Outer);
    }

    #[test]
    fn bulls_carry_their_board_values() {
        let bull = SegmentId::Bull.segment().unwrap();
        assert_eq!(bull.category, SegmentCategory::Bullseye);
        assert_eq!(bull.raw_value, 25);

        let double_bull = SegmentId::DoubleBull.segment().unwrap();
        assert_eq!(double_bull.category, SegmentCategory::DoubleBullseye);
        assert_eq!(double_bull.raw_value, 50);
    }

    #[test]
    fn out_of_range_sectors_are_rejected() {
        for id in [SegmentId::Inner(0), SegmentId::Double(21), SegmentId::Triple(25)] {
            assert!(matches!(id.segment(), Err(ScoringError::InvalidSegment { .. })), "{id:?}");
        }
    }

    #[test]
    fn qualifying_categories() {
        use SegmentCategory::*;
        for category in [Double, Triple, Bullseye, DoubleBullseye] {
            assert!(category.qualifies_as_out(), "{category:?}");
        }
        for category in [Inner, Outer, Other, ResetButton] {
            assert!(!category.qualifies_as_out(), "{category:?}");
        }
    }

    #[test]
    fn unknown_category_fails_to_deserialize() {
        let yaml = "id: Miss\ncategory: Quadruple\nraw_value: 80\ndisplay_name: Q20\n";
        assert!(serde_yaml_ng::from_str::<Segment>(yaml).is_err());

        let yaml = "id: Miss\ncategory: Other\nraw_value: 32\ndisplay_name: Other 32\n";
        let segment: Segment = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(segment.category, SegmentCategory::Other);
    }
}
