//! CLI argument parsing

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::MAX_RESULTS;
use crate::core::search::SearchSource;

/// track-id - identify tracks and read their tags
///
/// Searches Bandcamp or MusicBrainz for a track, or prints the ID3 metadata
/// of a local file under canonical field names.
#[derive(Parser, Debug)]
#[command(name = "track-id")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a catalogue for a track
    Search {
        /// Free-text query, e.g. "artist title"
        #[arg(value_name = "QUERY")]
        query: String,

        /// Where to search
        #[arg(short, long, value_enum, default_value_t = Source::Bandcamp)]
        source: Source,

        /// Maximum number of results (1-10)
        #[arg(short = 'n', long, value_name = "N", default_value_t = MAX_RESULTS)]
        #[arg(value_parser = clap::value_parser!(u16).range(1..=MAX_RESULTS as i64).map(usize::from))]
        limit: usize,

        /// Print results as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show audio properties and tags of a file
    Info {
        /// Audio file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Show the frame id each field came from
        #[arg(long, default_value = "false")]
        raw: bool,
    },

    /// List the frame id -> field mapping
    Fields,
}

/// `--source` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Bandcamp,
    #[value(name = "musicbrainz")]
    MusicBrainz,
}

impl From<Source> for SearchSource {
    fn from(source: Source) -> Self {
        match source {
            Source::Bandcamp => SearchSource::Bandcamp,
            Source::MusicBrainz => SearchSource::MusicBrainz,
        }
    }
}

impl Cli {
    /// Default log filter from -v / -q (`RUST_LOG` still wins)
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
