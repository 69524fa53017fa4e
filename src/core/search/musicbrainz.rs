//! MusicBrainz recording search (`/ws/2/recording?query=...&fmt=json`).

use serde_json::Value;

use crate::config::{MUSICBRAINZ_API_BASE, MUSICBRAINZ_RECORDING_URL, MUSICBRAINZ_USER_AGENT};
use crate::core::types::SearchResult;
use crate::error::SearchError;

pub(super) const SERVICE: &str = "MusicBrainz";

pub(super) fn request(agent: &ureq::Agent, query: &str, limit: usize) -> Result<Value, SearchError> {
    let url = search_url(query, limit);

    let outcome = agent
        .get(&url)
        .set("User-Agent", MUSICBRAINZ_USER_AGENT)
        .set("Accept", "application/json")
        .call();

    super::read_json(SERVICE, outcome)
}

fn search_url(query: &str, limit: usize) -> String {
    format!(
        "{MUSICBRAINZ_API_BASE}/recording?query={}&fmt=json&limit={limit}",
        urlencoding::encode(query)
    )
}

pub(super) fn parse(body: &Value, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let recordings = body
        .get("recordings")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::body(SERVICE, "missing recordings array"))?;

    Ok(recordings
        .iter()
        .filter_map(recording_result)
        .take(limit)
        .collect())
}

fn recording_result(rec: &Value) -> Option<SearchResult> {
    let title = rec["title"].as_str()?.trim();
    let id = rec["id"].as_str()?.trim();
    if title.is_empty() || id.is_empty() {
        return None;
    }

    Some(SearchResult {
        title: title.to_string(),
        artist: artist_credit(&rec["artist-credit"]),
        url: format!("{MUSICBRAINZ_RECORDING_URL}/{id}"),
    })
}

/// "A feat. B" from the credit list; join phrases are used when present.
fn artist_credit(credits: &Value) -> String {
    let Some(credits) = credits.as_array() else {
        return String::new();
    };

    let mut out = String::new();
    for (i, credit) in credits.iter().enumerate() {
        let name = credit
            .as_str()
            .or_else(|| credit["name"].as_str())
            .or_else(|| credit["artist"]["name"].as_str())
            .unwrap_or_default();
        out.push_str(name);

        if i + 1 < credits.len() {
            out.push_str(credit["joinphrase"].as_str().unwrap_or(" "));
        }
    }

    out.trim().to_string()
}
