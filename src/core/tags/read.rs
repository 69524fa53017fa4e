//! core/tags/read.rs
//! Read the ID3 tag of a file and flatten it into `RawFrame`s.
//!
//! - No field mapping happens here; that is `resolve`'s job.
//! - Frame order is file order, so "later frame wins" stays meaningful.
//! - Frame ids are reported as stored: `id3` renames ID3v2.2 ids to their
//!   v2.3 form on read, so they are mapped back here.
//! - A tag `id3` rejects part-way through is re-read frame by frame (`recover`).

use std::fs::File;
use std::path::Path;

use id3::frame::{Content, Picture};
use id3::{ErrorKind, Tag, Version};
use tracing::{debug, warn};

use crate::core::types::{RawFrame, RawValue, TagFrames, TagVersion, TextEncoding};
use crate::error::InfoError;

use super::recover::read_frames_individually;
use super::util::parse_slash_pair;

pub fn read_frames(path: &Path) -> Result<TagFrames, InfoError> {
    // Open first: a missing file must not be reported as "no tag".
    File::open(path).map_err(|source| InfoError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) => {
            let message = e.to_string();
            match (e.kind, e.partial_tag) {
                (_, Some(partial)) => return Ok(recover(path, partial, &message)),
                (ErrorKind::Io(source), None) => {
                    return Err(InfoError::FileAccess {
                        path: path.to_path_buf(),
                        source,
                    });
                }
                (_, None) => {
                    return Err(InfoError::TagContainerAbsent {
                        path: path.to_path_buf(),
                        reason: message,
                    });
                }
            }
        }
    };

    let frames = raw_frames(&tag);
    debug!(
        "Read {} frame(s) from {} ({:?})",
        frames.len(),
        path.display(),
        tag.version()
    );

    Ok(TagFrames {
        version: tag_version(tag.version()),
        frames,
    })
}

/// `id3` stopped at a frame it couldn't decode. Walk the frames ourselves so
/// only that frame is lost; keep `id3`'s partial result if the walk can't run.
fn recover(path: &Path, partial: Tag, message: &str) -> TagFrames {
    let version = tag_version(partial.version());

    match read_frames_individually(path) {
        Ok(Some(frames)) => {
            warn!(
                "Tag in {} is damaged ({message}), reading it frame by frame",
                path.display()
            );
            TagFrames { version, frames }
        }
        Ok(None) => {
            warn!(
                "Tag in {} is damaged, using what could be read: {message}",
                path.display()
            );
            TagFrames {
                version,
                frames: raw_frames(&partial),
            }
        }
        Err(e) => {
            warn!(
                "Tag in {} is damaged ({message}) and could not be re-read: {e}",
                path.display()
            );
            TagFrames {
                version,
                frames: raw_frames(&partial),
            }
        }
    }
}

fn tag_version(v: Version) -> TagVersion {
    match v {
        Version::Id3v22 => TagVersion::Id3v22,
        Version::Id3v23 => TagVersion::Id3v23,
        Version::Id3v24 => TagVersion::Id3v24,
    }
}

pub(crate) fn raw_frames(tag: &Tag) -> Vec<RawFrame> {
    let version = tag.version();
    tag.frames()
        .filter_map(|frame| {
            let id = frame.id_for_version(version).unwrap_or(frame.id());
            let value = raw_value(id, frame.content())?;
            Some(RawFrame {
                id: id.to_string(),
                value,
            })
        })
        .collect()
}

/// Best-effort conversion of one frame's content.
/// Returns `None` for content kinds that never carry display text (PRIV, UFID, ...).
pub(crate) fn raw_value(id: &str, content: &Content) -> Option<RawValue> {
    match content {
        Content::Text(s) if matches!(id, "TRCK" | "TPOS" | "TRK" | "TPA") => match parse_slash_pair(s) {
            (Some(number), total) => Some(RawValue::Pair(number, total)),
            _ => Some(RawValue::Text(s.clone())),
        },

        // id3 joins multiple values of one text frame with NUL.
        Content::Text(s) if s.trim_end_matches('\0').contains('\0') => Some(RawValue::List(
            s.split('\0').map(str::to_owned).collect(),
        )),

        Content::Text(s) | Content::Link(s) => Some(RawValue::Text(s.clone())),

        // iTunNORM / iTunSMPB etc. are player bookkeeping, not comments.
        Content::Comment(c) if c.description.starts_with("iTun") => None,
        Content::Comment(c) => Some(RawValue::Text(c.text.clone())),

        Content::Lyrics(l) => Some(RawValue::Text(l.text.clone())),

        Content::Picture(p) => Some(RawValue::Text(describe_picture(p))),

        // Frames the id3 crate doesn't parse: keep the bytes, let the resolver decode.
        Content::Unknown(unknown) => {
            let (&first, rest) = unknown.data.split_first()?;
            match TextEncoding::from_byte(first) {
                Some(encoding) => Some(RawValue::Encoded {
                    encoding,
                    bytes: rest.to_vec(),
                }),
                None => {
                    debug!("frame {id}: unknown text encoding byte {first:#04x}");
                    None
                }
            }
        }

        _ => None,
    }
}

fn describe_picture(p: &Picture) -> String {
    let kb = p.data.len().div_ceil(1024);
    if p.mime_type.is_empty() {
        format!("Artwork ({kb} KB)")
    } else {
        format!("Artwork ({}, {kb} KB)", p.mime_type)
    }
}
