//! core/mod.rs
//!
//! The brain of the tool:
//! - Read a file's tag container (metadata IO)
//! - Resolve frames into canonical fields
//! - Probe stream properties
//! - Search remote catalogues
//!
//! Everything here returns plain data structs; printing is the CLI's job.
//!
//! The `info` pipeline is explicit:
//!   (A) read frames -> TagFrames
//!   (B) resolve -> Record
//!   (C) probe -> AudioProperties

pub mod filename;
pub mod probe;
pub mod search;
pub mod tags;
pub mod types;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::InfoError;
use types::{Field, FileReport};

/// Run the whole `info` pipeline for one file.
///
/// - Fails only when the file can't be opened or has no tag container
/// - Undecodable frames are dropped and counted in `dropped_frames`
/// - Stream probing never fails the call
pub fn inspect(path: &Path) -> Result<FileReport, InfoError> {
    let tag = tags::read_frames(path)?;
    let resolution = tags::resolve_report(&tag.frames);

    if resolution.all_failed() {
        warn!(
            "None of the {} recognized frame(s) in {} could be decoded",
            resolution.mapped,
            path.display()
        );
    }

    let properties = probe::probe(path);

    let filename_guess = if resolution.record.get(Field::Title).is_none()
        || resolution.record.get(Field::Artist).is_none()
    {
        filename::guess_artist_title(path)
    } else {
        None
    };

    debug!(
        fields = resolution.record.len(),
        dropped = resolution.dropped.len(),
        "Inspected {}",
        path.display()
    );

    Ok(FileReport {
        file: path.to_path_buf(),
        properties,
        tag_version: tag.version,
        tags: resolution.record,
        dropped_frames: resolution.dropped.len(),
        filename_guess,
    })
}
