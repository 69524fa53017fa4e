//! track-id: look up tracks on Bandcamp or MusicBrainz and read ID3 metadata
//! into canonical field names.

pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
