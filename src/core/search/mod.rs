//! core/search/mod.rs
//!
//! One-shot track search against a remote catalogue.
//! - Exactly one HTTP request per call, no retry.
//! - Results keep the service's ranking order and are capped at `limit`.
//! - Response parsing lives in pure functions (`bandcamp::parse`, `musicbrainz::parse`).

mod bandcamp;
mod musicbrainz;

use std::io::Read;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::{CONNECT_TIMEOUT, MAX_RESULTS, REQUEST_TIMEOUT};
use crate::core::types::SearchResult;
use crate::error::SearchError;

/// Longest slice of an error body we keep for the message.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSource {
    #[default]
    Bandcamp,
    MusicBrainz,
}

impl SearchSource {
    pub fn service_name(self) -> &'static str {
        match self {
            SearchSource::Bandcamp => bandcamp::SERVICE,
            SearchSource::MusicBrainz => musicbrainz::SERVICE,
        }
    }
}

pub struct SearchClient {
    agent: ureq::Agent,
    limit: usize,
}

impl SearchClient {
    pub fn new(limit: usize) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build();

        Self {
            agent,
            limit: limit.clamp(1, MAX_RESULTS),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Search `source` for `query`.
    ///
    /// A blank query returns no results without touching the network.
    pub fn search(
        &self,
        source: SearchSource,
        query: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty query, skipping request");
            return Ok(Vec::new());
        }

        info!(service = source.service_name(), query, "Searching");

        let results = match source {
            SearchSource::Bandcamp => {
                let body = bandcamp::request(&self.agent, query)?;
                bandcamp::parse(&body, self.limit)?
            }
            SearchSource::MusicBrainz => {
                let body = musicbrainz::request(&self.agent, query, self.limit)?;
                musicbrainz::parse(&body, self.limit)?
            }
        };

        debug!(count = results.len(), "Search finished");
        Ok(results)
    }
}

/// Search the default catalogue with the default result cap.
pub fn search(query: &str) -> Result<Vec<SearchResult>, SearchError> {
    SearchClient::new(MAX_RESULTS).search(SearchSource::default(), query)
}

/// Turn a ureq outcome into parsed JSON, classifying failures.
fn read_json(
    service: &'static str,
    outcome: Result<ureq::Response, ureq::Error>,
) -> Result<Value, SearchError> {
    let response = match outcome {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(SearchError::Status {
                service,
                status,
                body: truncate(body.trim(), ERROR_BODY_LIMIT),
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(SearchError::Transport {
                service,
                reason: transport.to_string(),
            });
        }
    };

    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .map_err(|e| SearchError::Transport {
            service,
            reason: format!("failed to read response: {e}"),
        })?;

    serde_json::from_str(&body)
        .map_err(|e| SearchError::body(service, format!("invalid JSON: {e}")))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
