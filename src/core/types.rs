//! Core data types shared between core logic and the CLI.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No terminal output
//! - No filesystem code
//! - No tag parsing code
//!
//! `Record` is what the `info` command prints; `SearchResult` is one line of `search`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Canonical field names, independent of the ID3 version a frame came from.
///
/// Variant order is display order: `Record` keeps fields sorted by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Subtitle,
    Artist,
    AlbumArtist,
    Album,
    TrackNumber,
    DiscNumber,
    Year,
    OriginalYear,
    Genre,
    Composer,
    Lyricist,
    Conductor,
    Remixer,
    Grouping,
    Bpm,
    Key,
    Mood,
    Language,
    Publisher,
    Copyright,
    Isrc,
    Compilation,
    Length,
    Comment,
    Lyrics,
    Artwork,
    TitleSort,
    ArtistSort,
    AlbumSort,
    AlbumArtistSort,
    EncodedBy,
    EncoderSettings,
    ArtistUrl,
    FileUrl,
    SourceUrl,
}

impl Field {
    pub const ALL: [Field; 36] = [
        Field::Title,
        Field::Subtitle,
        Field::Artist,
        Field::AlbumArtist,
        Field::Album,
        Field::TrackNumber,
        Field::DiscNumber,
        Field::Year,
        Field::OriginalYear,
        Field::Genre,
        Field::Composer,
        Field::Lyricist,
        Field::Conductor,
        Field::Remixer,
        Field::Grouping,
        Field::Bpm,
        Field::Key,
        Field::Mood,
        Field::Language,
        Field::Publisher,
        Field::Copyright,
        Field::Isrc,
        Field::Compilation,
        Field::Length,
        Field::Comment,
        Field::Lyrics,
        Field::Artwork,
        Field::TitleSort,
        Field::ArtistSort,
        Field::AlbumSort,
        Field::AlbumArtistSort,
        Field::EncodedBy,
        Field::EncoderSettings,
        Field::ArtistUrl,
        Field::FileUrl,
        Field::SourceUrl,
    ];

    /// Machine name used as the output key (`"track_number"`).
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Subtitle => "subtitle",
            Field::Artist => "artist",
            Field::AlbumArtist => "album_artist",
            Field::Album => "album",
            Field::TrackNumber => "track_number",
            Field::DiscNumber => "disc_number",
            Field::Year => "year",
            Field::OriginalYear => "original_year",
            Field::Genre => "genre",
            Field::Composer => "composer",
            Field::Lyricist => "lyricist",
            Field::Conductor => "conductor",
            Field::Remixer => "remixer",
            Field::Grouping => "grouping",
            Field::Bpm => "bpm",
            Field::Key => "key",
            Field::Mood => "mood",
            Field::Language => "language",
            Field::Publisher => "publisher",
            Field::Copyright => "copyright",
            Field::Isrc => "isrc",
            Field::Compilation => "compilation",
            Field::Length => "length",
            Field::Comment => "comment",
            Field::Lyrics => "lyrics",
            Field::Artwork => "artwork",
            Field::TitleSort => "title_sort",
            Field::ArtistSort => "artist_sort",
            Field::AlbumSort => "album_sort",
            Field::AlbumArtistSort => "album_artist_sort",
            Field::EncodedBy => "encoded_by",
            Field::EncoderSettings => "encoder_settings",
            Field::ArtistUrl => "artist_url",
            Field::FileUrl => "file_url",
            Field::SourceUrl => "source_url",
        }
    }

    /// Human label for `Label: value` output (`"Track Number"`).
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Subtitle => "Subtitle",
            Field::Artist => "Artist",
            Field::AlbumArtist => "Album Artist",
            Field::Album => "Album",
            Field::TrackNumber => "Track Number",
            Field::DiscNumber => "Disc Number",
            Field::Year => "Year",
            Field::OriginalYear => "Original Year",
            Field::Genre => "Genre",
            Field::Composer => "Composer",
            Field::Lyricist => "Lyricist",
            Field::Conductor => "Conductor",
            Field::Remixer => "Remixer",
            Field::Grouping => "Grouping",
            Field::Bpm => "BPM",
            Field::Key => "Key",
            Field::Mood => "Mood",
            Field::Language => "Language",
            Field::Publisher => "Publisher",
            Field::Copyright => "Copyright",
            Field::Isrc => "ISRC",
            Field::Compilation => "Compilation",
            Field::Length => "Length (ms)",
            Field::Comment => "Comment",
            Field::Lyrics => "Lyrics",
            Field::Artwork => "Artwork",
            Field::TitleSort => "Title Sort",
            Field::ArtistSort => "Artist Sort",
            Field::AlbumSort => "Album Sort",
            Field::AlbumArtistSort => "Album Artist Sort",
            Field::EncodedBy => "Encoded By",
            Field::EncoderSettings => "Encoder Settings",
            Field::ArtistUrl => "Artist URL",
            Field::FileUrl => "File URL",
            Field::SourceUrl => "Source URL",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Fields whose value is "number/total".
    pub fn is_numbered_pair(self) -> bool {
        matches!(self, Field::TrackNumber | Field::DiscNumber)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text encodings an ID3v2 frame can declare in its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1,
    /// UTF-16 with a byte order mark.
    Utf16,
    Utf16Be,
    Utf8,
}

impl TextEncoding {
    pub fn from_byte(b: u8) -> Option<TextEncoding> {
        match b {
            0 => Some(TextEncoding::Latin1),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf16Be),
            3 => Some(TextEncoding::Utf8),
            _ => None,
        }
    }
}

/// A frame value as it came out of the container, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// Multi-valued frame (several genres, several artists...).
    List(Vec<String>),
    /// "number of total" frames: TRCK / TPOS.
    Pair(String, Option<String>),
    /// Bytes still in the encoding the frame declares.
    Encoded {
        encoding: TextEncoding,
        bytes: Vec<u8>,
    },
    /// The container reader rejected this frame; carries its reason.
    Damaged(String),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// One frame of a tag: identifier + value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub id: String,
    pub value: RawValue,
}

impl RawFrame {
    pub fn new(id: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// ID3v2 minor version of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagVersion {
    #[serde(rename = "ID3v2.2")]
    Id3v22,
    #[serde(rename = "ID3v2.3")]
    Id3v23,
    #[serde(rename = "ID3v2.4")]
    Id3v24,
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagVersion::Id3v22 => "ID3v2.2",
            TagVersion::Id3v23 => "ID3v2.3",
            TagVersion::Id3v24 => "ID3v2.4",
        };
        f.write_str(s)
    }
}

/// Everything pulled out of one file's tag container, in file order.
#[derive(Debug, Clone)]
pub struct TagFrames {
    pub version: TagVersion,
    pub frames: Vec<RawFrame>,
}

/// Canonical field -> display string.
///
/// Only fields that were present in the source frames are stored;
/// there are no empty placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<Field, String>,

    /// Frame id each value came from (for `info --raw`).
    #[serde(skip)]
    sources: BTreeMap<Field, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. The last insert for a field wins.
    pub fn insert(&mut self, field: Field, value: String, source: &str) {
        self.fields.insert(field, value);
        self.sources.insert(field, source.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Lookup by canonical name (`"artist"`).
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        Field::from_name(name).and_then(|f| self.get(f))
    }

    pub fn source_of(&self, field: Field) -> Option<&str> {
        self.sources.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Stream-level facts about an audio file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioProperties {
    pub file_size: u64,
    pub duration_ms: Option<u64>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    /// Average over the whole file, tag bytes included.
    pub bitrate_kbps: Option<u32>,
}

/// One hit from a remote search, in the service's ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub artist: String,
    pub url: String,
}

/// Everything the `info` command shows about one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub properties: AudioProperties,
    pub tag_version: TagVersion,
    pub tags: Record,

    /// Mapped frames that could not be decoded and were dropped.
    pub dropped_frames: usize,

    /// (artist, title) parsed from the file name when the tag lacks either.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename_guess: Option<(String, String)>,
}
