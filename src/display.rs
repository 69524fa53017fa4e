//! Terminal output for the CLI.
//!
//! All functions write to a caller-supplied writer so `main` can hand them
//! stdout and tests can hand them a `Vec<u8>`.

use std::io::{self, Write};

use crate::core::tags::table_entries;
use crate::core::types::{AudioProperties, FileReport, SearchResult};

/// `1. Artist - Title` followed by the URL, one block per hit.
pub fn print_search_results(out: &mut impl Write, results: &[SearchResult]) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No matches found");
    }

    for (i, result) in results.iter().enumerate() {
        if result.artist.is_empty() {
            writeln!(out, "{}. {}", i + 1, result.title)?;
        } else {
            writeln!(out, "{}. {} - {}", i + 1, result.artist, result.title)?;
        }
        if !result.url.is_empty() {
            writeln!(out, "   {}", result.url)?;
        }
    }
    Ok(())
}

pub fn print_search_json(out: &mut impl Write, results: &[SearchResult]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)
}

/// File information block, then one `Label: value` line per field.
pub fn print_report(out: &mut impl Write, report: &FileReport, raw: bool) -> io::Result<()> {
    writeln!(out, "File information")?;
    print_properties(out, report)?;
    writeln!(out)?;

    if report.tags.is_empty() {
        writeln!(out, "No metadata tags found")?;
    } else {
        let width = report
            .tags
            .iter()
            .map(|(field, _)| field.label().len())
            .max()
            .unwrap_or(0);

        for (field, value) in report.tags.iter() {
            let label = format!("{}:", field.label());
            if raw {
                let id = report.tags.source_of(field).unwrap_or("?");
                writeln!(out, "  [{id:<4}] {label:<w$} {value}", w = width + 1)?;
            } else {
                writeln!(out, "  {label:<w$} {value}", w = width + 1)?;
            }
        }
    }

    if report.dropped_frames > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} frame(s) could not be decoded and were skipped",
            report.dropped_frames
        )?;
    }

    if let Some((artist, title)) = &report.filename_guess {
        writeln!(out)?;
        writeln!(out, "From file name: {artist} - {title}")?;
    }

    Ok(())
}

fn print_properties(out: &mut impl Write, report: &FileReport) -> io::Result<()> {
    let props: &AudioProperties = &report.properties;

    writeln!(out, "  Path:        {}", report.file.display())?;
    writeln!(out, "  Size:        {}", format_size(props.file_size))?;
    if let Some(ms) = props.duration_ms {
        writeln!(out, "  Duration:    {}", format_duration(ms))?;
    }
    if let Some(kbps) = props.bitrate_kbps {
        writeln!(out, "  Bitrate:     {kbps} kbps")?;
    }
    if let Some(hz) = props.sample_rate {
        writeln!(out, "  Sample rate: {hz} Hz")?;
    }
    if let Some(channels) = props.channels {
        writeln!(out, "  Channels:    {channels}")?;
    }
    writeln!(out, "  Tag version: {}", report.tag_version)
}

pub fn print_report_json(out: &mut impl Write, report: &FileReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Frame id -> canonical name, sorted by field then id.
pub fn print_fields(out: &mut impl Write) -> io::Result<()> {
    let mut entries: Vec<_> = table_entries().collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));

    for (id, field) in entries {
        writeln!(out, "{id:<4}  {}", field.name())?;
    }
    Ok(())
}

/// `m:ss`, or `h:mm:ss` past an hour.
fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn format_size(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    if bytes as f64 >= MB {
        format!("{:.2} MB ({bytes} bytes)", bytes as f64 / MB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Field, Record, TagVersion};
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn report(tags: Record) -> FileReport {
        FileReport {
            file: PathBuf::from("song.mp3"),
            properties: AudioProperties {
                file_size: 4_000_000,
                duration_ms: Some(215_000),
                sample_rate: Some(44_100),
                channels: Some(2),
                bitrate_kbps: Some(148),
            },
            tag_version: TagVersion::Id3v23,
            tags,
            dropped_frames: 0,
            filename_guess: None,
        }
    }

    #[test]
    fn search_lines_are_numbered() {
        let results = vec![
            SearchResult {
                title: "One More Time".into(),
                artist: "Daft Punk".into(),
                url: "https://example.com/1".into(),
            },
            SearchResult {
                title: "Solo".into(),
                artist: String::new(),
                url: String::new(),
            },
        ];
        let text = render(|out| print_search_results(out, &results));
        assert_eq!(
            text,
            "1. Daft Punk - One More Time\n   https://example.com/1\n2. Solo\n"
        );
    }

    #[test]
    fn empty_search_says_so() {
        let text = render(|out| print_search_results(out, &[]));
        assert_eq!(text, "No matches found\n");
    }

    #[test]
    fn report_lists_fields_in_display_order() {
        let mut tags = Record::new();
        tags.insert(Field::Album, "Discovery".into(), "TALB");
        tags.insert(Field::Title, "One More Time".into(), "TIT2");

        let text = render(|out| print_report(out, &report(tags.clone()), false));
        assert!(text.contains("Duration:    3:35"));
        assert!(text.contains("Tag version: ID3v2.3"));
        let title = text.find("Title:").unwrap();
        let album = text.find("Album:").unwrap();
        assert!(title < album);

        let raw = render(|out| print_report(out, &report(tags), true));
        assert!(raw.contains("[TIT2]"));
    }

    #[test]
    fn empty_record_message() {
        let text = render(|out| print_report(out, &report(Record::new()), false));
        assert!(text.contains("No metadata tags found"));
    }

    #[test]
    fn report_json_has_tags_object() {
        let mut tags = Record::new();
        tags.insert(Field::Artist, "Daft Punk".into(), "TPE1");
        let text = render(|out| print_report_json(out, &report(tags)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tags"]["artist"], "Daft Punk");
        assert_eq!(value["tag_version"], "ID3v2.3");
        assert_eq!(value["properties"]["sample_rate"], 44_100);
    }

    #[test]
    fn fields_table_lists_both_families() {
        let text = render(|out| print_fields(out));
        assert!(text.lines().any(|l| l == "TIT2  title"));
        assert!(text.lines().any(|l| l == "TT2   title"));
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65_400), "1:05");
        assert_eq!(format_duration(3_725_000), "1:02:05");
    }
}
