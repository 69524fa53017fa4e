//! core/probe.rs
//! Stream properties (Symphonia) for the `info` header block.
//!
//! Never fatal: a file Symphonia can't demux still has a tag worth showing.

use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;
use tracing::debug;

use crate::core::types::AudioProperties;

pub fn probe(path: &Path) -> AudioProperties {
    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let mut props = match probe_stream(path) {
        Ok(p) => p,
        Err(e) => {
            debug!("No stream properties for {}: {e}", path.display());
            AudioProperties::default()
        }
    };

    props.file_size = file_size;
    props.bitrate_kbps = average_kbps(file_size, props.duration_ms);
    props
}

fn probe_stream(path: &Path) -> Result<AudioProperties, String> {
    let file = File::open(path).map_err(|e| format!("Open failed: {e}"))?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Format probe failed: {e}"))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No supported audio track found.".to_string())?;

    let params = &track.codec_params;

    Ok(AudioProperties {
        file_size: 0,
        duration_ms: duration_from_params(params.time_base, params.n_frames),
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count() as u16),
        bitrate_kbps: None,
    })
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

fn average_kbps(file_size: u64, duration_ms: Option<u64>) -> Option<u32> {
    let ms = duration_ms.filter(|&ms| ms > 0)?;
    // bytes * 8 / ms == kilobits per second
    Some((file_size * 8 / ms) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_needs_both_params() {
        assert_eq!(duration_from_params(None, Some(44_100)), None);
        assert_eq!(duration_from_params(Some(TimeBase::new(1, 44_100)), None), None);
        assert_eq!(
            duration_from_params(Some(TimeBase::new(1, 44_100)), Some(44_100 * 3)),
            Some(3000)
        );
    }

    #[test]
    fn bitrate_from_size_and_duration() {
        // 320 kbps for 3 minutes is 7_200_000 bytes
        assert_eq!(average_kbps(7_200_000, Some(180_000)), Some(320));
        assert_eq!(average_kbps(7_200_000, Some(0)), None);
        assert_eq!(average_kbps(7_200_000, None), None);
    }

    #[test]
    fn garbage_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let props = probe(&path);
        assert_eq!(props.file_size, 20);
        assert_eq!(props.duration_ms, None);
        assert_eq!(props.bitrate_kbps, None);
    }
}
