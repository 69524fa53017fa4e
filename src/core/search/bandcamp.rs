//! Bandcamp public autocomplete search.
//!
//! The endpoint takes a JSON POST and answers with
//! `{ "auto": { "results": [ { "type": "t", "name", "band_name", "item_url_path", ... } ] } }`.
//! Only track hits (`type == "t"`) are kept; albums and bands are skipped.

use serde_json::{Value, json};

use crate::config::{BANDCAMP_SEARCH_URL, BANDCAMP_USER_AGENT};
use crate::core::types::SearchResult;
use crate::error::SearchError;

pub(super) const SERVICE: &str = "Bandcamp";

pub(super) fn request(agent: &ureq::Agent, query: &str) -> Result<Value, SearchError> {
    let payload = json!({
        "fan_id": null,
        "full_page": false,
        "search_filter": "",
        "search_text": query,
    });

    let outcome = agent
        .post(BANDCAMP_SEARCH_URL)
        .set("User-Agent", BANDCAMP_USER_AGENT)
        .set("Accept", "application/json")
        .set("Accept-Language", "en-US,en;q=0.9")
        .send_json(payload);

    super::read_json(SERVICE, outcome)
}

pub(super) fn parse(body: &Value, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let results = body
        .get("auto")
        .and_then(|auto| auto.get("results"))
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::body(SERVICE, "missing auto.results array"))?;

    Ok(results
        .iter()
        .filter(|item| item["type"].as_str() == Some("t"))
        .filter_map(track_result)
        .take(limit)
        .collect())
}

fn track_result(item: &Value) -> Option<SearchResult> {
    let title = item["name"].as_str()?.trim();
    if title.is_empty() {
        return None;
    }

    Some(SearchResult {
        title: title.to_string(),
        artist: item["band_name"].as_str().unwrap_or_default().trim().to_string(),
        url: item["item_url_path"].as_str().unwrap_or_default().trim().to_string(),
    })
}
