//! core/tags/recover.rs
//! Frame-by-frame reading for tags the `id3` crate gives up on.
//!
//! `id3` stops at the first frame it can't decode and only hands back the
//! frames before it. Here the raw frame headers are walked instead, and each
//! frame is decoded on its own (wrapped in a one-frame tag), so a bad frame
//! costs only itself.
//!
//! - A rejected plain text frame is passed on as `Encoded` bytes; the resolver
//!   decides whether it can be read.
//! - Any other rejected frame becomes `Damaged` and is dropped by the resolver.
//! - The walk stops at padding, at a header that isn't a frame id, or at a
//!   frame running past the end of the tag.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use id3::{Tag, Version};
use tracing::{debug, trace};

use crate::core::types::{RawFrame, RawValue, TextEncoding};

use super::read::raw_value;

const TAG_HEADER_LEN: usize = 10;

const TAG_UNSYNCHRONISATION: u8 = 0x80;
const TAG_EXTENDED_HEADER: u8 = 0x40;

/// v2.3 frame flags that change how the body is stored: compression, encryption, grouping.
const V23_BODY_FLAGS: u16 = 0x00E0;
/// v2.4: grouping, compression, encryption, unsynchronisation, data length indicator.
const V24_BODY_FLAGS: u16 = 0x004F;

/// Re-read the ID3v2 tag at the start of `path` one frame at a time.
///
/// `Ok(None)` when the file doesn't start with an ID3v2 header
/// (tags inside WAV/AIFF chunks) or the header is unusable.
pub(crate) fn read_frames_individually(path: &Path) -> io::Result<Option<Vec<RawFrame>>> {
    let mut file = File::open(path)?;

    let mut header = [0u8; TAG_HEADER_LEN];
    match file.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    if &header[..3] != b"ID3" {
        return Ok(None);
    }

    let size = syncsafe(&header[6..10]) as u64;
    let mut tag = header.to_vec();
    file.take(size).read_to_end(&mut tag)?;

    Ok(frames_from_bytes(&tag))
}

/// Split a complete tag (header included) into raw frames, in file order.
pub(crate) fn frames_from_bytes(tag: &[u8]) -> Option<Vec<RawFrame>> {
    let header = tag.get(..TAG_HEADER_LEN)?;
    if &header[..3] != b"ID3" {
        return None;
    }

    let version = match header[3] {
        2 => Version::Id3v22,
        3 => Version::Id3v23,
        4 => Version::Id3v24,
        _ => return None,
    };
    let flags = header[5];
    let size = syncsafe(&header[6..10]) as usize;

    let body = &tag[TAG_HEADER_LEN..];
    let body = &body[..size.min(body.len())];

    // v2.2 and v2.3 unsynchronise the whole tag; v2.4 does it per frame.
    let body: Cow<[u8]> =
        if version != Version::Id3v24 && flags & TAG_UNSYNCHRONISATION != 0 {
            Cow::Owned(resync(body))
        } else {
            Cow::Borrowed(body)
        };

    let mut pos = 0;
    if version != Version::Id3v22 && flags & TAG_EXTENDED_HEADER != 0 {
        pos = extended_header_len(version, &body)?;
    }

    let mut frames = Vec::new();
    while let Some(frame) = next_frame(version, &body, pos) {
        pos += frame.bytes.len();
        if let Some(raw) = decode_one(version, &frame) {
            frames.push(raw);
        }
    }

    debug!("Recovered {} frame(s) frame by frame", frames.len());
    Some(frames)
}

/// One frame's bytes as stored in the tag.
struct FrameBytes<'a> {
    id: &'a str,
    flags: u16,
    /// Header and body together.
    bytes: &'a [u8],
    body: &'a [u8],
}

fn next_frame(version: Version, data: &[u8], pos: usize) -> Option<FrameBytes<'_>> {
    let (id_len, header_len) = match version {
        Version::Id3v22 => (3, 6),
        Version::Id3v23 | Version::Id3v24 => (4, 10),
    };

    let header = data.get(pos..pos + header_len)?;
    if header[0] == 0 {
        trace!("Padding at offset {pos}");
        return None;
    }

    let id = std::str::from_utf8(&header[..id_len]).ok()?;
    if !id.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        debug!("Stopping at offset {pos}: {id:?} is not a frame id");
        return None;
    }

    let (size, flags) = match version {
        Version::Id3v22 => (
            u32::from_be_bytes([0, header[3], header[4], header[5]]),
            0,
        ),
        Version::Id3v23 => (
            u32::from_be_bytes([header[4], header[5], header[6], header[7]]),
            u16::from_be_bytes([header[8], header[9]]),
        ),
        Version::Id3v24 => (
            syncsafe(&header[4..8]),
            u16::from_be_bytes([header[8], header[9]]),
        ),
    };

    let end = pos + header_len + size as usize;
    let Some(bytes) = data.get(pos..end) else {
        debug!("Frame {id} at offset {pos} runs past the end of the tag");
        return None;
    };

    Some(FrameBytes {
        id,
        flags,
        bytes,
        body: &bytes[header_len..],
    })
}

/// Decode a single frame by wrapping it in a tag of its own.
fn decode_one(version: Version, frame: &FrameBytes<'_>) -> Option<RawFrame> {
    let major = match version {
        Version::Id3v22 => 2,
        Version::Id3v23 => 3,
        Version::Id3v24 => 4,
    };

    let mut tag = Vec::with_capacity(TAG_HEADER_LEN + frame.bytes.len());
    tag.extend_from_slice(b"ID3");
    tag.extend_from_slice(&[major, 0, 0]);
    tag.extend_from_slice(&to_syncsafe(frame.bytes.len() as u32));
    tag.extend_from_slice(frame.bytes);

    let value = match Tag::read_from2(Cursor::new(tag)) {
        Ok(tag) => {
            let decoded = tag.frames().next()?;
            raw_value(frame.id, decoded.content())?
        }
        Err(e) => {
            debug!("Frame {} rejected: {e}", frame.id);
            undecodable(version, frame, e.to_string())
        }
    };

    Some(RawFrame {
        id: frame.id.to_string(),
        value,
    })
}

fn undecodable(version: Version, frame: &FrameBytes<'_>, reason: String) -> RawValue {
    let body_flags = match version {
        Version::Id3v22 => 0,
        Version::Id3v23 => V23_BODY_FLAGS,
        Version::Id3v24 => V24_BODY_FLAGS,
    };
    let is_text = frame.id.starts_with('T') && frame.id != "TXXX" && frame.id != "TXX";

    if is_text && frame.flags & body_flags == 0 {
        if let Some((&first, rest)) = frame.body.split_first() {
            if let Some(encoding) = TextEncoding::from_byte(first) {
                return RawValue::Encoded {
                    encoding,
                    bytes: rest.to_vec(),
                };
            }
        }
    }

    RawValue::Damaged(reason)
}

fn extended_header_len(version: Version, body: &[u8]) -> Option<usize> {
    let size = body.get(..4)?;
    let len = match version {
        // v2.3 excludes the size field itself, v2.4 includes it.
        Version::Id3v23 => 4 + u32::from_be_bytes([size[0], size[1], size[2], size[3]]) as usize,
        _ => syncsafe(size) as usize,
    };
    (len <= body.len()).then_some(len)
}

/// 4 bytes, 7 bits each.
fn syncsafe(b: &[u8]) -> u32 {
    b.iter()
        .take(4)
        .fold(0u32, |acc, &byte| (acc << 7) | u32::from(byte & 0x7F))
}

fn to_syncsafe(n: u32) -> [u8; 4] {
    [
        ((n >> 21) & 0x7F) as u8,
        ((n >> 14) & 0x7F) as u8,
        ((n >> 7) & 0x7F) as u8,
        (n & 0x7F) as u8,
    ]
}

/// Undo unsynchronisation: every `FF 00` becomes `FF`.
fn resync(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut prev = 0u8;
    for &b in bytes {
        if !(prev == 0xFF && b == 0x00) {
            out.push(b);
        }
        prev = b;
    }
    out
}
