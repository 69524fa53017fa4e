//! core/tags/util.rs
//! Small parsing helpers shared by tag reading and resolving.

use crate::core::types::TextEncoding;

use super::genres::genre_name;

/// Split strings like:
/// - "3" -> (Some("3"), None)
/// - "3/12" -> (Some("3"), Some("12"))
/// - "" -> (None, None)
pub(crate) fn parse_slash_pair(s: &str) -> (Option<String>, Option<String>) {
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.splitn(2, '/');
    let a = parts.next().map(str::trim).filter(|p| !p.is_empty());
    let b = parts.next().map(str::trim).filter(|p| !p.is_empty());
    (a.map(str::to_owned), b.map(str::to_owned))
}

/// "N/M" when the total is known, "N" when it is missing or zero.
/// Numeric parts lose leading zeros ("03" -> "3"); anything else is kept as written.
pub(crate) fn format_pair(number: &str, total: Option<&str>) -> Option<String> {
    let number = normalize_number(number)?;

    let total = total
        .and_then(normalize_number)
        .filter(|t| t != "0");

    Some(match total {
        Some(t) => format!("{number}/{t}"),
        None => number,
    })
}

fn normalize_number(s: &str) -> Option<String> {
    let s = trim_padding(s);
    if s.is_empty() {
        return None;
    }
    match s.parse::<u32>() {
        Ok(n) => Some(n.to_string()),
        Err(_) => Some(s.to_string()),
    }
}

/// Strip NUL padding and surrounding whitespace.
pub(crate) fn trim_padding(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\0' || c == '\u{feff}' || c.is_whitespace())
}

/// Split a NUL-separated multi-value string; empty entries are dropped.
pub(crate) fn split_values(s: &str) -> Vec<String> {
    s.split('\0')
        .map(trim_padding)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Decode frame text bytes in the encoding the frame declares.
pub(crate) fn decode_text(encoding: TextEncoding, bytes: &[u8]) -> Result<String, String> {
    match encoding {
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        TextEncoding::Utf8 => {
            String::from_utf8(bytes.to_vec()).map_err(|e| format!("invalid UTF-8: {e}"))
        }
        TextEncoding::Utf16 => {
            let (little_endian, rest) = match bytes {
                [0xFF, 0xFE, rest @ ..] => (true, rest),
                [0xFE, 0xFF, rest @ ..] => (false, rest),
                [] => return Ok(String::new()),
                _ => return Err("UTF-16 text without byte order mark".to_string()),
            };
            decode_utf16(rest, little_endian)
        }
        TextEncoding::Utf16Be => decode_utf16(bytes, false),
    }
}

fn decode_utf16(bytes: &[u8], little_endian: bool) -> Result<String, String> {
    // A lone trailing NUL is a common writer bug; anything else odd-sized is broken.
    let bytes = match bytes {
        [head @ .., 0] if bytes.len() % 2 == 1 => head,
        _ => bytes,
    };
    if bytes.len() % 2 != 0 {
        return Err(format!("UTF-16 text has odd length {}", bytes.len()));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| {
            if little_endian {
                u16::from_le_bytes([c[0], c[1]])
            } else {
                u16::from_be_bytes([c[0], c[1]])
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| "UTF-16 text has an unpaired surrogate".to_string())
}

/// Expand ID3v1 genre references in a TCON value.
///
/// - "17" -> "Rock"
/// - "(17)(18)" -> "Rock; Techno"
/// - "(17)Rock" -> "Rock" (refinement replaces the matching reference)
/// - "(RX)" / "(CR)" -> "Remix" / "Cover"
/// - "((Weird)" -> "(Weird)" (escaped parenthesis)
pub(crate) fn expand_genre(raw: &str) -> String {
    let s = trim_padding(raw);

    if let Ok(n) = s.parse::<usize>() {
        return genre_name(n).map(str::to_owned).unwrap_or_else(|| s.to_string());
    }

    let mut names: Vec<String> = Vec::new();
    let mut rest = s;

    while rest.starts_with('(') && !rest.starts_with("((") {
        let Some(close) = rest.find(')') else { break };
        let token = &rest[1..close];

        let name = match token {
            "RX" => Some("Remix"),
            "CR" => Some("Cover"),
            _ => token.parse::<usize>().ok().and_then(genre_name),
        };
        let Some(name) = name else { break };

        names.push(name.to_string());
        rest = &rest[close + 1..];
    }

    let refinement = match rest.strip_prefix('(') {
        Some(unescaped) if rest.starts_with("((") => unescaped,
        _ => rest,
    };
    let refinement = trim_padding(refinement);

    if !refinement.is_empty() {
        names.retain(|n| !n.eq_ignore_ascii_case(refinement));
        names.push(refinement.to_string());
    }

    names.join("; ")
}

/// Parse common "boolean-ish" tag values.
/// Accepts: "1", "0", "true", "false", "yes", "no", "y", "n"
pub(crate) fn parse_boolish(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
