// src/classify/rules.rs
//
// Quality interpretation rules: raw metric values in, display-ready
// verdicts out. Every function here is total; missing data degrades to an
// explicit "Unknown", never to an error.

use crate::service::{AnalysisReport, CutoffSummary, QualityTier};

/// Shape of the spectral roll-off, judged from the cutoff confidence score.
///
/// Confidence measures how steeply energy drops at the cutoff, not
/// statistical certainty: streaming codecs roll off smoothly, lossy
/// re-encodes chop like a brick wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffShape {
    Unknown,
    Smooth,
    Moderate,
    Sharp,
}

impl CutoffShape {
    pub fn label(&self) -> &'static str {
        match self {
            CutoffShape::Unknown => "Unknown",
            CutoffShape::Smooth => "Smooth (streaming-style roll-off)",
            CutoffShape::Moderate => "Moderate roll-off",
            CutoffShape::Sharp => "Sharp cutoff (lossy re-encode characteristic)",
        }
    }
}

/// Provenance judgment for the audio, from the cutoff frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikelyOrigin {
    Unknown,
    LowQuality,
    Streaming,
    HighBitrateLossy,
    Lossless,
}

impl LikelyOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            LikelyOrigin::Unknown => "Unknown",
            LikelyOrigin::LowQuality => "Low quality (heavily compressed / old streaming source)",
            LikelyOrigin::Streaming => "Streaming-quality source (~160 kbps class)",
            LikelyOrigin::HighBitrateLossy => "High-quality lossy encode (~256–320 kbps class)",
            LikelyOrigin::Lossless => "Lossless or near-lossless source",
        }
    }
}

/// Cutoff frequency as a short display string: `"~19.5 kHz"`, or
/// `"Unknown"` when the service reported none (absent or zero).
pub fn format_cutoff(hz: Option<f64>) -> String {
    match hz {
        Some(hz) if hz > 0.0 => format!("~{:.1} kHz", hz / 1000.0),
        _ => "Unknown".to_string(),
    }
}

/// `"M:SS"` with unbounded minutes and floored seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    format!("{minutes}:{secs:02}")
}

/// Classify the roll-off shape. Comparisons are strict on the lower bound:
/// exactly 0.25 is already Moderate, exactly 0.6 already Sharp.
pub fn interpret_cutoff_shape(confidence: Option<f64>) -> CutoffShape {
    match confidence {
        None => CutoffShape::Unknown,
        Some(c) if c < 0.25 => CutoffShape::Smooth,
        Some(c) if c < 0.6 => CutoffShape::Moderate,
        Some(_) => CutoffShape::Sharp,
    }
}

/// Classify the likely source from the cutoff frequency.
///
/// The confidence score is accepted alongside the cutoff but does not
/// currently influence the verdict; the 16/18/20 kHz bands alone decide,
/// upper bounds exclusive.
pub fn interpret_likely_origin(cutoff_hz: Option<f64>, _confidence: Option<f64>) -> LikelyOrigin {
    let hz = match cutoff_hz {
        Some(hz) if hz > 0.0 => hz,
        _ => return LikelyOrigin::Unknown,
    };

    let khz = hz / 1000.0;
    match khz {
        k if k < 16.0 => LikelyOrigin::LowQuality,
        k if k < 18.0 => LikelyOrigin::Streaming,
        k if k < 20.0 => LikelyOrigin::HighBitrateLossy,
        _ => LikelyOrigin::Lossless,
    }
}

/// Display-ready interpretation of one report.
///
/// Derived on every render and never stored; the service's per-metric
/// tiers are passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub bitrate_tier: QualityTier,
    pub sample_rate_tier: QualityTier,
    pub loudness_tier: QualityTier,
    pub cutoff_description: String,
    pub cutoff_shape: CutoffShape,
    pub likely_origin: LikelyOrigin,
}

impl QualityAssessment {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let metrics = &report.metrics;
        let confidence = metrics
            .cutoff_summary
            .as_ref()
            .and_then(CutoffSummary::confidence);

        Self {
            bitrate_tier: report.quality.bitrate_kbps,
            sample_rate_tier: report.quality.sample_rate_khz,
            loudness_tier: report.quality.loudness_lufs,
            cutoff_description: format_cutoff(metrics.cutoff_hz),
            cutoff_shape: interpret_cutoff_shape(confidence),
            likely_origin: interpret_likely_origin(metrics.cutoff_hz, confidence),
        }
    }
}
