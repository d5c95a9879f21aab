//! Segment classification
//!
//! Turns a [`Segment`] reported by a hit source into the [`NormalizedHit`]
//! the round engine scores. Both bull variants score a flat 50 and count as
//! qualifying outs alongside doubles and trebles.

use crate::types::{NormalizedHit, Segment, SegmentCategory};
use crate::{Result, ScoringError};

/// Points any bull variant scores
pub const BULLSEYE_POINTS: u32 = 50;

/// Classify one dart.
///
/// Fails only for the reset button, which the round engine intercepts
/// before classification.
pub fn classify(segment: &Segment) -> Result<NormalizedHit> {
    if segment.category == SegmentCategory::ResetButton {
        return Err(ScoringError::NotClassifiable { category: segment.category });
    }
    Ok(normalize(segment))
}

/// Classification without the reset-button guard. Callers must have
/// intercepted reset segments already.
pub(crate) fn normalize(segment: &Segment) -> NormalizedHit {
    let points =
        if segment.category.is_bullseye() { BULLSEYE_POINTS } else { segment.raw_value };

    NormalizedHit {
        points,
        qualifies_as_out: segment.category.qualifies_as_out(),
        category: segment.category,
        display_name: segment.display_name.clone(),
    }
}
