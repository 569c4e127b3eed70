// tests/contract_test.rs
// Compatibility with the analysis service's JSON envelope, both published shapes.

mod test_utils;

use mp3checkr::service::{CutoffSummary, MetricsReport, QualityTier, ServiceEnvelope};

#[test]
fn test_success_envelope_with_labeled_cutoff() {
    let envelope: ServiceEnvelope =
        serde_json::from_str(&test_utils::success_envelope()).expect("parse envelope");
    assert!(envelope.success);
    assert!(envelope.error.is_none());

    let metrics = envelope.metrics.expect("metrics section");
    assert_eq!(metrics.file, "uploads/track.mp3");
    assert!((metrics.duration_secs - 215.37).abs() < 1e-9);
    assert_eq!(metrics.bitrate_kbps, 320);
    assert!((metrics.sample_rate_khz - 44.1).abs() < 1e-9);
    assert!((metrics.loudness_lufs + 9.23).abs() < 1e-9);
    assert_eq!(metrics.cutoff_hz, Some(19500.0));

    let summary = metrics.cutoff_summary.expect("cutoff summary");
    assert_eq!(summary.confidence(), Some(0.8));
    assert_eq!(summary.cutoff_range(), Some((19400.0, 19600.0)));

    let quality = envelope.quality.expect("quality section");
    assert_eq!(quality.bitrate_kbps, QualityTier::Golden);
    assert_eq!(quality.sample_rate_khz, QualityTier::Green);
    assert_eq!(quality.loudness_lufs, QualityTier::Yellow);

    assert_eq!(envelope.lyrics.as_deref(), Some("first line\nsecond line"));
    let info = envelope.song_info.expect("song info");
    assert_eq!(info.song_name.as_deref(), Some("Track"));
    assert_eq!(info.artist_name.as_deref(), Some("Artist"));
}

#[test]
fn test_success_envelope_with_legacy_pair_cutoff() {
    let envelope: ServiceEnvelope =
        serde_json::from_str(&test_utils::success_envelope_legacy_pair()).expect("parse envelope");
    assert!(envelope.success);

    let metrics = envelope.metrics.expect("metrics section");
    let summary = metrics.cutoff_summary.expect("cutoff summary");
    assert!(matches!(summary, CutoffSummary::Pair(..)));
    assert_eq!(summary.confidence(), Some(0.55));
    assert_eq!(summary.cutoff_range(), Some((17000.0, 17400.0)));

    // Lyrics block is entirely optional
    assert!(envelope.lyrics.is_none());
    assert!(envelope.song_info.is_none());
}

#[test]
fn test_failure_envelope_has_no_sections() {
    let envelope: ServiceEnvelope =
        serde_json::from_str(&test_utils::failure_envelope("Only MP3 files are allowed"))
            .expect("parse envelope");
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("Only MP3 files are allowed"));
    assert!(envelope.metrics.is_none());
    assert!(envelope.quality.is_none());
}

#[test]
fn test_metrics_without_cutoff_fields() {
    let metrics: MetricsReport = serde_json::from_str(
        r#"{
            "file": "uploads/t.mp3",
            "duration_sec": 10.0,
            "bitrate_kbps": 128,
            "sample_rate_kHz": 44.1,
            "loudness_LUFS": -14.0
        }"#,
    )
    .expect("parse metrics");

    assert_eq!(metrics.cutoff_hz, None);
    assert!(metrics.cutoff_summary.is_none());
    assert!(metrics.validate().is_ok());
}

#[test]
fn test_unknown_envelope_fields_are_tolerated() {
    let mut body: serde_json::Value =
        serde_json::from_str(&test_utils::success_envelope()).expect("parse fixture");
    body["processing_ms"] = serde_json::json!(1234);
    body["metrics"]["codec"] = serde_json::json!("mp3");

    let envelope: ServiceEnvelope = serde_json::from_value(body).expect("parse envelope");
    assert!(envelope.success);
    assert_eq!(envelope.metrics.expect("metrics").bitrate_kbps, 320);
}

#[test]
fn test_unrecognized_cutoff_summary_still_parses() {
    let mut body: serde_json::Value =
        serde_json::from_str(&test_utils::success_envelope()).expect("parse fixture");
    body["metrics"]["summaryCutOff"] = serde_json::json!("n/a");

    let envelope: ServiceEnvelope = serde_json::from_value(body).expect("parse envelope");
    let metrics = envelope.metrics.expect("metrics");
    let summary = metrics.cutoff_summary.expect("summary");
    assert!(matches!(summary, CutoffSummary::Other(_)));
    assert_eq!(summary.confidence(), None);
    assert_eq!(summary.cutoff_range(), None);
}
