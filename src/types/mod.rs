//! Core types shared by the classifier, the round engine and display layers.
//!
//! - [`Segment`] is what a hit source reports for one board impact
//! - [`NormalizedHit`] is a dart after classification
//! - [`RoundOutcome`] is one entry of the round history
//! - [`GameSnapshot`] is the read-only state published to observers

mod hit;
mod segment;
mod snapshot;
mod update_rate;

pub use hit::{GameStatus, NormalizedHit, RoundOutcome};
pub use segment::{Segment, SegmentCategory, SegmentId};
pub use snapshot::GameSnapshot;
pub use update_rate::UpdateRate;
