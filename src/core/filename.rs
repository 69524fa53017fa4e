//! core/filename.rs
//! Guess artist/title from a file name like "Artist - Title [320].mp3".
//!
//! Display hint only: a guess never ends up in a `Record`.

use std::path::Path;

/// Returns `(artist, title)` when the stem looks like `artist - title` or `artist: title`.
pub fn guess_artist_title(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let cleaned = strip_bracketed(stem);
    let cleaned = cleaned.trim();

    split_once_nonempty(cleaned, " - ")
        .or_else(|| split_once_nonempty(cleaned, "-"))
        .or_else(|| split_once_nonempty(cleaned, ":"))
}

fn split_once_nonempty(s: &str, sep: &str) -> Option<(String, String)> {
    let (artist, title) = s.split_once(sep)?;
    let (artist, title) = (artist.trim(), title.trim());
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

/// Drop every `[...]` segment ("[Official Video]", "[FLAC]").
fn strip_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;

    for c in s.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(name: &str) -> Option<(String, String)> {
        guess_artist_title(Path::new(name))
    }

    fn pair(a: &str, t: &str) -> Option<(String, String)> {
        Some((a.to_string(), t.to_string()))
    }

    #[test]
    fn dash_separated() {
        assert_eq!(guess("Artist - Title.mp3"), pair("Artist", "Title"));
        assert_eq!(guess("/music/x/Artist-Title.mp3"), pair("Artist", "Title"));
    }

    #[test]
    fn spaced_dash_wins_over_hyphenated_names() {
        assert_eq!(guess("Jay-Z - Song.mp3"), pair("Jay-Z", "Song"));
    }

    #[test]
    fn colon_separated() {
        assert_eq!(guess("Artist: Title.mp3"), pair("Artist", "Title"));
    }

    #[test]
    fn brackets_are_removed() {
        assert_eq!(
            guess("Artist - Title [Official Video] [320].mp3"),
            pair("Artist", "Title")
        );
    }

    #[test]
    fn no_pattern_no_guess() {
        assert_eq!(guess("track01.mp3"), None);
        assert_eq!(guess("- Title.mp3"), None);
        assert_eq!(guess("[Artist - Title].mp3"), None);
    }
}
