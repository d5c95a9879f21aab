//! Board payload decoding
//!
//! The board notifies each impact as a short ASCII payload such as `3.4@`
//! (treble 20) or `BTN@` (reset button). Recordings store payloads in the
//! dash-separated decimal form the board's tooling prints: `51-46-52-64`.

use crate::types::SegmentId;
use crate::{Result, ScoringError};

/// Every payload the board is known to send.
#[rustfmt::skip]
pub const SEGMENT_CODES: &[(&[u8], SegmentId)] = &[
    (b"2.3@", SegmentId::Inner(1)),   (b"2.4@", SegmentId::Triple(1)),  (b"2.5@", SegmentId::Outer(1)),  (b"2.6@", SegmentId::Double(1)),
    (b"9.1@", SegmentId::Inner(2)),   (b"9.0@", SegmentId::Triple(2)),  (b"9.2@", SegmentId::Outer(2)),  (b"8.2@", SegmentId::Double(2)),
    (b"7.1@", SegmentId::Inner(3)),   (b"7.0@", SegmentId::Triple(3)),  (b"7.2@", SegmentId::Outer(3)),  (b"8.4@", SegmentId::Double(3)),
    (b"0.1@", SegmentId::Inner(4)),   (b"0.3@", SegmentId::Triple(4)),  (b"0.5@", SegmentId::Outer(4)),  (b"0.6@", SegmentId::Double(4)),
    (b"5.1@", SegmentId::Inner(5)),   (b"5.2@", SegmentId::Triple(5)),  (b"5.4@", SegmentId::Outer(5)),  (b"4.6@", SegmentId::Double(5)),
    (b"1.0@", SegmentId::Inner(6)),   (b"1.1@", SegmentId::Triple(6)),  (b"1.3@", SegmentId::Outer(6)),  (b"4.4@", SegmentId::Double(6)),
    (b"11.1@", SegmentId::Inner(7)),  (b"11.2@", SegmentId::Triple(7)), (b"11.4@", SegmentId::Outer(7)), (b"8.6@", SegmentId::Double(7)),
    (b"6.2@", SegmentId::Inner(8)),   (b"6.4@", SegmentId::Triple(8)),  (b"6.5@", SegmentId::Outer(8)),  (b"6.6@", SegmentId::Double(8)),
    (b"9.3@", SegmentId::Inner(9)),   (b"9.4@", SegmentId::Triple(9)),  (b"9.5@", SegmentId::Outer(9)),  (b"9.6@", SegmentId::Double(9)),
    (b"2.0@", SegmentId::Inner(10)),  (b"2.1@", SegmentId::Triple(10)), (b"2.2@", SegmentId::Outer(10)), (b"4.3@", SegmentId::Double(10)),
    (b"7.3@", SegmentId::Inner(11)),  (b"7.4@", SegmentId::Triple(11)), (b"7.5@", SegmentId::Outer(11)), (b"7.6@", SegmentId::Double(11)),
    (b"5.0@", SegmentId::Inner(12)),  (b"5.3@", SegmentId::Triple(12)), (b"5.5@", SegmentId::Outer(12)), (b"5.6@", SegmentId::Double(12)),
    (b"0.0@", SegmentId::Inner(13)),  (b"0.2@", SegmentId::Triple(13)), (b"0.4@", SegmentId::Outer(13)), (b"4.5@", SegmentId::Double(13)),
    (b"10.3@", SegmentId::Inner(14)), (b"10.4@", SegmentId::Triple(14)), (b"10.5@", SegmentId::Outer(14)), (b"10.6@", SegmentId::Double(14)),
    (b"3.0@", SegmentId::Inner(15)),  (b"3.1@", SegmentId::Triple(15)), (b"3.2@", SegmentId::Outer(15)), (b"4.2@", SegmentId::Double(15)),
    (b"11.0@", SegmentId::Inner(16)), (b"11.3@", SegmentId::Triple(16)), (b"11.5@", SegmentId::Outer(16)), (b"11.6@", SegmentId::Double(16)),
    (b"10.1@", SegmentId::Inner(17)), (b"10.0@", SegmentId::Triple(17)), (b"10.2@", SegmentId::Outer(17)), (b"8.3@", SegmentId::Double(17)),
    (b"1.2@", SegmentId::Inner(18)),  (b"1.4@", SegmentId::Triple(18)), (b"1.5@", SegmentId::Outer(18)), (b"1.6@", SegmentId::Double(18)),
    (b"6.1@", SegmentId::Inner(19)),  (b"6.0@", SegmentId::Triple(19)), (b"6.3@", SegmentId::Outer(19)), (b"8.5@", SegmentId::Double(19)),
    (b"3.3@", SegmentId::Inner(20)),  (b"3.4@", SegmentId::Triple(20)), (b"3.5@", SegmentId::Outer(20)), (b"3.6@", SegmentId::Double(20)),
    (b"8.0@", SegmentId::Bull),
    (b"4.0@", SegmentId::DoubleBull),
    (b"BTN@", SegmentId::ResetButton),
];

/// Look up the segment a payload stands for.
///
/// Returns `None` for payloads outside the table; hit sources drop those.
pub fn decode_payload(payload: &[u8]) -> Option<SegmentId> {
    SEGMENT_CODES.iter().find(|(code, _)| *code == payload).map(|(_, id)| *id)
}

/// The payload the board sends for a segment, if it has one.
pub fn payload_for(id: SegmentId) -> Option<&'static [u8]> {
    SEGMENT_CODES.iter().find(|(_, known)| *known == id).map(|(code, _)| *code)
}

/// Render a payload as dash-separated decimal bytes.
pub fn format_payload(payload: &[u8]) -> String {
    payload.iter().map(|b| b.to_string()).collect::<Vec<_>>().join("-")
}

/// Parse the dash-separated decimal form back into bytes.
pub fn parse_payload(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScoringError::parse_error("payload", "empty payload"));
    }

    text.split('-')
        .map(|part| {
            part.trim().parse::<u8>().map_err(|e| {
                ScoringError::parse_error("payload", format!("'{}' in '{}': {}", part, text, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_covers_the_whole_board() {
        // 20 sectors x 4 rings, two bulls and the reset button
        assert_eq!(SEGMENT_CODES.len(), 83);

        let payloads: HashSet<_> = SEGMENT_CODES.iter().map(|(code, _)| *code).collect();
        let ids: HashSet<_> = SEGMENT_CODES.iter().map(|(_, id)| *id).collect();
        assert_eq!(payloads.len(), 83, "duplicate payload in table");
        assert_eq!(ids.len(), 83, "duplicate segment in table");

        for (_, id) in SEGMENT_CODES {
            assert!(id.segment().is_ok(), "{id:?} does not build a segment");
        }
    }

    #[test]
    fn decodes_known_payloads() {
        assert_eq!(decode_payload(b"3.4@"), Some(SegmentId::Triple(20)));
        assert_eq!(decode_payload(b"11.1@"), Some(SegmentId::Inner(7)));
        assert_eq!(decode_payload(b"8.0@"), Some(SegmentId::Bull));
        assert_eq!(decode_payload(b"BTN@"), Some(SegmentId::ResetButton));
    }

    #[test]
    fn unmapped_payloads_decode_to_none() {
        assert_eq!(decode_payload(b""), None);
        assert_eq!(decode_payload(b"3.4"), None);
        assert_eq!(decode_payload(b"99.9@"), None);
    }

    #[test]
    fn dash_form_matches_board_tooling() {
        assert_eq!(format_payload(b"3.4@"), "51-46-52-64");
        assert_eq!(parse_payload("51-46-52-64").unwrap(), b"3.4@".to_vec());
        assert_eq!(parse_payload(" 66-84-78-64 \n").unwrap(), b"BTN@".to_vec());
        assert_eq!(payload_for(SegmentId::Double(1)), Some(&b"2.6@"[..]));
        assert_eq!(payload_for(SegmentId::Miss), None);
    }

    #[test]
    fn malformed_dash_form_is_rejected() {
        for text in ["", "51--46", "51-46-x-64", "300-46"] {
            assert!(matches!(parse_payload(text), Err(ScoringError::Parse { .. })), "{text:?}");
        }
    }
}
