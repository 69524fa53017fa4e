//! Compiled-in configuration.
//!
//! There is no config file: endpoints and limits are constants,
//! everything else is a CLI flag (see `cli.rs`) or `RUST_LOG`.

use std::time::Duration;

/// Upper bound on search results printed per query.
pub const MAX_RESULTS: usize = 10;

pub const BANDCAMP_SEARCH_URL: &str =
    "https://bandcamp.com/api/bcsearch_public_api/1/autocomplete_elastic";

/// Bandcamp rejects requests that don't look like a browser.
pub const BANDCAMP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.86 Safari/537.36";

pub const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2";
pub const MUSICBRAINZ_RECORDING_URL: &str = "https://musicbrainz.org/recording";

/// MusicBrainz asks every client to identify itself.
pub const MUSICBRAINZ_USER_AGENT: &str = concat!("track-id/", env!("CARGO_PKG_VERSION"));

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
