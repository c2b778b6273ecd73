//! Best-effort audio duration probing via symphonia.
//!
//! Duration is a nicety on version rows, not an invariant: any probe
//! failure (unknown container, truncated file, missing sample rate)
//! yields `None` and a warn-level log line, never an upload failure.

use std::io::Cursor;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Probe the uploaded bytes for a playable duration in seconds.
///
/// Runs on the blocking pool since symphonia's demuxing is synchronous.
pub async fn probe_duration_secs(data: Vec<u8>, extension: &str) -> Option<f64> {
    let ext = extension.to_string();
    let result = tokio::task::spawn_blocking(move || probe_blocking(data, &ext)).await;

    match result {
        Ok(duration) => duration,
        Err(e) => {
            tracing::warn!(error = %e, "Duration probe task panicked");
            None
        }
    }
}

fn probe_blocking(data: Vec<u8>, extension: &str) -> Option<f64> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(extension);

    let probed = match symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    ) {
        Ok(probed) => probed,
        Err(e) => {
            tracing::warn!(extension, error = %e, "Could not probe audio container");
            return None;
        }
    };

    let track = probed.format.default_track()?;
    let params = &track.codec_params;

    let n_frames = params.n_frames?;
    let sample_rate = params.sample_rate?;
    if sample_rate == 0 {
        return None;
    }

    Some(n_frames as f64 / f64::from(sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_probe_to_none() {
        let duration = probe_duration_secs(vec![0u8; 256], "mp3").await;
        assert!(duration.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_probes_to_none() {
        let duration = probe_duration_secs(Vec::new(), "wav").await;
        assert!(duration.is_none());
    }
}
