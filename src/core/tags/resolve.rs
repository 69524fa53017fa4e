//! core/tags/resolve.rs
//! Turn raw frames into a `Record` (canonical field -> display string).
//!
//! - Unmapped frame ids are skipped silently.
//! - A frame that fails to decode is dropped; the rest still resolve.
//! - Same field twice: the frame that comes later in the input wins.

use tracing::{debug, trace};

use crate::core::types::{Field, RawFrame, RawValue, Record};
use crate::error::FrameDecodeError;

use super::frames::canonical_name_for;
use super::util::{
    decode_text, expand_genre, format_pair, parse_boolish, parse_slash_pair, split_values,
};

/// Joins the entries of multi-valued frames.
pub const MULTI_VALUE_SEPARATOR: &str = "; ";

/// `resolve` plus bookkeeping the CLI uses for warnings.
#[derive(Debug, Default)]
pub struct Resolution {
    pub record: Record,
    /// Frames whose id was in the table (decoded or not).
    pub mapped: usize,
    pub dropped: Vec<FrameDecodeError>,
}

impl Resolution {
    /// Every mapped frame failed to decode.
    pub fn all_failed(&self) -> bool {
        self.mapped > 0 && self.dropped.len() == self.mapped
    }
}

pub fn resolve(frames: &[RawFrame]) -> Record {
    resolve_report(frames).record
}

pub fn resolve_report(frames: &[RawFrame]) -> Resolution {
    let mut out = Resolution::default();

    for frame in frames {
        let Some(field) = canonical_name_for(&frame.id) else {
            trace!(id = %frame.id, "skipping unmapped frame");
            continue;
        };
        out.mapped += 1;

        match normalize(field, &frame.value) {
            Ok(Some(value)) => out.record.insert(field, value, &frame.id),
            Ok(None) => trace!(id = %frame.id, "frame has no value"),
            Err(reason) => {
                let err = FrameDecodeError {
                    id: frame.id.clone(),
                    reason,
                };
                debug!("dropping frame: {err}");
                out.dropped.push(err);
            }
        }
    }

    out
}

fn normalize(field: Field, value: &RawValue) -> Result<Option<String>, String> {
    let values = match value {
        RawValue::Text(s) => split_values(s),
        RawValue::List(items) => items.iter().flat_map(|s| split_values(s)).collect(),
        RawValue::Pair(number, total) => return Ok(format_pair(number, total.as_deref())),
        RawValue::Encoded { encoding, bytes } => split_values(&decode_text(*encoding, bytes)?),
        RawValue::Damaged(reason) => return Err(reason.clone()),
    };

    Ok(display_value(field, values))
}

fn display_value(field: Field, values: Vec<String>) -> Option<String> {
    if field.is_numbered_pair() {
        let (number, total) = parse_slash_pair(values.first()?);
        return format_pair(&number?, total.as_deref());
    }

    let values: Vec<String> = match field {
        Field::Genre => values
            .iter()
            .map(|v| expand_genre(v))
            .filter(|v| !v.is_empty())
            .collect(),
        Field::Compilation => values
            .into_iter()
            .map(|v| match parse_boolish(&v) {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => v,
            })
            .collect(),
        _ => values,
    };

    if values.is_empty() {
        None
    } else {
        Some(values.join(MULTI_VALUE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TextEncoding;

    fn text(id: &str, s: &str) -> RawFrame {
        RawFrame::new(id, s)
    }

    fn pair(id: &str, n: &str, total: Option<&str>) -> RawFrame {
        RawFrame::new(id, RawValue::Pair(n.into(), total.map(str::to_owned)))
    }

    #[test]
    fn empty_input_gives_empty_record() {
        let record = resolve(&[]);
        assert!(record.is_empty());
    }

    #[test]
    fn title_and_artist_from_either_family() {
        let v23 = resolve(&[text("TIT2", "Test Song"), text("TPE1", "Test Artist")]);
        let v22 = resolve(&[text("TT2", "Test Song"), text("TP1", "Test Artist")]);

        for record in [&v23, &v22] {
            assert_eq!(record.len(), 2);
            assert_eq!(record.get_by_name("title"), Some("Test Song"));
            assert_eq!(record.get_by_name("artist"), Some("Test Artist"));
        }
        let values = |r: &Record| r.iter().map(|(f, v)| (f, v.to_string())).collect::<Vec<_>>();
        assert_eq!(values(&v23), values(&v22));
    }

    #[test]
    fn track_pairs() {
        let cases = [
            (Some("12"), "3/12"),
            (Some("0"), "3"),
            (None, "3"),
        ];
        for (total, expected) in cases {
            let record = resolve(&[pair("TRCK", "3", total)]);
            assert_eq!(record.get(Field::TrackNumber), Some(expected));
        }
    }

    #[test]
    fn textual_track_and_disc_numbers() {
        let record = resolve(&[text("TRCK", "3/12"), text("TPOS", "1/0")]);
        assert_eq!(record.get(Field::TrackNumber), Some("3/12"));
        assert_eq!(record.get(Field::DiscNumber), Some("1"));
    }

    #[test]
    fn missing_track_number_is_omitted() {
        let record = resolve(&[pair("TRCK", "", Some("12")), text("TPOS", "/2")]);
        assert!(record.is_empty());
    }

    #[test]
    fn multi_valued_genre_is_joined_in_order() {
        let frame = RawFrame::new("TCON", RawValue::List(vec!["Rock".into(), "Indie".into()]));
        assert_eq!(resolve(&[frame]).get(Field::Genre), Some("Rock; Indie"));
    }

    #[test]
    fn nul_separated_text_is_multi_valued() {
        let record = resolve(&[text("TPE1", "Alice\0Bob\0")]);
        assert_eq!(record.get(Field::Artist), Some("Alice; Bob"));
    }

    #[test]
    fn empty_list_is_not_emitted() {
        let record = resolve(&[RawFrame::new("TCON", RawValue::List(vec![]))]);
        assert!(record.is_empty());
    }

    #[test]
    fn numeric_genre_references_expand() {
        let record = resolve(&[text("TCON", "(17)")]);
        assert_eq!(record.get(Field::Genre), Some("Rock"));
    }

    #[test]
    fn trailing_padding_is_trimmed() {
        let record = resolve(&[text("TALB", "Album\0\0\0")]);
        assert_eq!(record.get(Field::Album), Some("Album"));
    }

    #[test]
    fn encoded_frames_are_decoded() {
        let frame = RawFrame::new(
            "TIT2",
            RawValue::Encoded {
                encoding: TextEncoding::Utf16,
                bytes: vec![0xFF, 0xFE, b'O', 0, b'k', 0, 0, 0],
            },
        );
        assert_eq!(resolve(&[frame]).get(Field::Title), Some("Ok"));
    }

    #[test]
    fn one_bad_frame_does_not_stop_the_rest() {
        let bad = RawFrame::new(
            "TALB",
            RawValue::Encoded {
                encoding: TextEncoding::Utf8,
                bytes: vec![0xFF, 0xFE, 0xFD],
            },
        );
        let frames = vec![
            text("TIT2", "Song"),
            text("TPE1", "Artist"),
            bad,
            text("TCON", "Rock"),
            text("TYER", "1999"),
        ];

        let report = resolve_report(&frames);
        assert_eq!(report.record.len(), 4);
        assert_eq!(report.record.get(Field::Album), None);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].id, "TALB");
        assert!(!report.all_failed());
    }

    #[test]
    fn damaged_frames_are_dropped_with_their_reason() {
        let frames = [
            RawFrame::new("APIC", RawValue::Damaged("encryption is not supported".into())),
            text("TIT2", "Song"),
        ];

        let report = resolve_report(&frames);
        assert_eq!(report.record.len(), 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, "encryption is not supported");
    }

    #[test]
    fn all_failed_only_when_every_mapped_frame_failed() {
        let bad = |id: &str| {
            RawFrame::new(
                id,
                RawValue::Encoded {
                    encoding: TextEncoding::Utf16,
                    bytes: vec![b'x', 0],
                },
            )
        };
        let report = resolve_report(&[bad("TIT2"), bad("TPE1"), text("PRIV", "x")]);
        assert!(report.record.is_empty());
        assert_eq!(report.mapped, 2);
        assert!(report.all_failed());
    }

    #[test]
    fn unknown_frames_are_skipped() {
        let report = resolve_report(&[text("PRIV", "blob"), text("TXXX", "x"), text("TIT2", "A")]);
        assert_eq!(report.record.len(), 1);
        assert_eq!(report.mapped, 1);
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn later_frame_wins_on_collision() {
        let record = resolve(&[text("TYER", "1999"), text("TDRC", "2001-05-04")]);
        assert_eq!(record.get(Field::Year), Some("2001-05-04"));
        assert_eq!(record.source_of(Field::Year), Some("TDRC"));

        let record = resolve(&[text("TDRC", "2001-05-04"), text("TYER", "1999")]);
        assert_eq!(record.get(Field::Year), Some("1999"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let frames = vec![
            text("TIT2", "Song"),
            text("TCON", "(17)Rock"),
            pair("TRCK", "3", Some("12")),
            text("COMM", "nice"),
        ];
        let first = resolve(&frames);
        for _ in 0..5 {
            assert_eq!(resolve(&frames), first);
        }
    }

    #[test]
    fn compilation_flag_reads_as_yes_no() {
        assert_eq!(resolve(&[text("TCMP", "1")]).get(Field::Compilation), Some("Yes"));
        assert_eq!(resolve(&[text("TCP", "0")]).get(Field::Compilation), Some("No"));
    }

    #[test]
    fn blank_values_are_omitted() {
        let record = resolve(&[text("TIT2", "   "), text("TPE1", "\0")]);
        assert!(record.is_empty());
    }
}
