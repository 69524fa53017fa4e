//! core/tags/frames.rs
//! Frame id -> canonical field table.
//!
//! ID3v2.3/2.4 use 4-character ids, ID3v2.2 uses 3-character ids.
//! Both families are listed separately and merged into one map on first use,
//! so a lookup never has to branch on the tag version.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::types::Field;

/// ID3v2.3 and ID3v2.4 frame ids.
const V23_FRAMES: &[(&str, Field)] = &[
    ("TIT2", Field::Title),
    ("TIT3", Field::Subtitle),
    ("TIT1", Field::Grouping),
    ("GRP1", Field::Grouping),
    ("TPE1", Field::Artist),
    ("TPE2", Field::AlbumArtist),
    ("TPE3", Field::Conductor),
    ("TPE4", Field::Remixer),
    ("TALB", Field::Album),
    ("TRCK", Field::TrackNumber),
    ("TPOS", Field::DiscNumber),
    ("TYER", Field::Year),
    ("TDRC", Field::Year),
    ("TORY", Field::OriginalYear),
    ("TDOR", Field::OriginalYear),
    ("TCON", Field::Genre),
    ("TCOM", Field::Composer),
    ("TEXT", Field::Lyricist),
    ("TBPM", Field::Bpm),
    ("TKEY", Field::Key),
    ("TMOO", Field::Mood),
    ("TLAN", Field::Language),
    ("TPUB", Field::Publisher),
    ("TCOP", Field::Copyright),
    ("TSRC", Field::Isrc),
    ("TCMP", Field::Compilation),
    ("TLEN", Field::Length),
    ("COMM", Field::Comment),
    ("USLT", Field::Lyrics),
    ("APIC", Field::Artwork),
    ("TSOT", Field::TitleSort),
    ("TSOP", Field::ArtistSort),
    ("TSOA", Field::AlbumSort),
    ("TSO2", Field::AlbumArtistSort),
    ("TENC", Field::EncodedBy),
    ("TSSE", Field::EncoderSettings),
    ("WOAR", Field::ArtistUrl),
    ("WOAF", Field::FileUrl),
    ("WOAS", Field::SourceUrl),
];

/// ID3v2.2 frame ids (TS2/TSA/TSP/TST/TCP are iTunes extensions).
const V22_FRAMES: &[(&str, Field)] = &[
    ("TT2", Field::Title),
    ("TT3", Field::Subtitle),
    ("TT1", Field::Grouping),
    ("TP1", Field::Artist),
    ("TP2", Field::AlbumArtist),
    ("TP3", Field::Conductor),
    ("TP4", Field::Remixer),
    ("TAL", Field::Album),
    ("TRK", Field::TrackNumber),
    ("TPA", Field::DiscNumber),
    ("TYE", Field::Year),
    ("TOR", Field::OriginalYear),
    ("TCO", Field::Genre),
    ("TCM", Field::Composer),
    ("TXT", Field::Lyricist),
    ("TBP", Field::Bpm),
    ("TKE", Field::Key),
    ("TLA", Field::Language),
    ("TPB", Field::Publisher),
    ("TCR", Field::Copyright),
    ("TRC", Field::Isrc),
    ("TCP", Field::Compilation),
    ("TLE", Field::Length),
    ("COM", Field::Comment),
    ("ULT", Field::Lyrics),
    ("PIC", Field::Artwork),
    ("TST", Field::TitleSort),
    ("TSP", Field::ArtistSort),
    ("TSA", Field::AlbumSort),
    ("TS2", Field::AlbumArtistSort),
    ("TEN", Field::EncodedBy),
    ("TSS", Field::EncoderSettings),
    ("WAR", Field::ArtistUrl),
    ("WAF", Field::FileUrl),
    ("WAS", Field::SourceUrl),
];

static FRAME_TABLE: LazyLock<HashMap<&'static str, Field>> = LazyLock::new(|| {
    V23_FRAMES
        .iter()
        .chain(V22_FRAMES.iter())
        .copied()
        .collect()
});

/// Canonical field for a frame id, or `None` for ids we don't map
/// (TXXX, PRIV, proprietary frames...).
pub fn canonical_name_for(id: &str) -> Option<Field> {
    FRAME_TABLE.get(id).copied()
}

/// All (frame id, field) pairs: v2.3/2.4 ids first, then v2.2.
pub fn table_entries() -> impl Iterator<Item = (&'static str, Field)> {
    V23_FRAMES.iter().chain(V22_FRAMES.iter()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn both_families_reach_the_same_field() {
        let pairs = [
            ("TIT2", "TT2", Field::Title),
            ("TPE1", "TP1", Field::Artist),
            ("TALB", "TAL", Field::Album),
            ("TRCK", "TRK", Field::TrackNumber),
            ("TCON", "TCO", Field::Genre),
            ("TYER", "TYE", Field::Year),
            ("COMM", "COM", Field::Comment),
            ("APIC", "PIC", Field::Artwork),
        ];

        for (v23, v22, field) in pairs {
            assert_eq!(canonical_name_for(v23), Some(field), "{v23}");
            assert_eq!(canonical_name_for(v22), Some(field), "{v22}");
        }
    }

    #[test]
    fn every_table_entry_is_reachable() {
        for (id, field) in table_entries() {
            assert_eq!(canonical_name_for(id), Some(field), "{id}");
        }
    }

    #[test]
    fn unknown_ids_are_not_found() {
        for id in ["TXXX", "PRIV", "XYZ", "", "tit2", "TIT2 "] {
            assert_eq!(canonical_name_for(id), None, "{id:?}");
        }
    }

    #[test]
    fn no_duplicate_ids() {
        let ids: Vec<&str> = table_entries().map(|(id, _)| id).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn id_lengths_match_their_family() {
        assert!(V23_FRAMES.iter().all(|(id, _)| id.len() == 4));
        assert!(V22_FRAMES.iter().all(|(id, _)| id.len() == 3));
    }

    #[test]
    fn common_fields_use_expected_names() {
        let expected = [
            ("TIT2", "title"),
            ("TPE1", "artist"),
            ("TALB", "album"),
            ("TRCK", "track_number"),
            ("TDRC", "year"),
            ("TCON", "genre"),
            ("COMM", "comment"),
        ];
        for (id, name) in expected {
            assert_eq!(canonical_name_for(id).map(Field::name), Some(name));
        }
    }
}
