//! Wire types for the analysis service's JSON contract.

use serde::{Deserialize, Serialize};

/// Media type the service accepts for uploads. The CLI declares it from the
/// file extension, the same way a browser picker would.
pub const MPEG_MEDIA_TYPE: &str = "audio/mpeg";

/// Per-metric quality tier assigned by the analysis service.
///
/// Tiers arrive as lowercase strings and are never computed client-side;
/// this crate only labels and colors them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Golden,
    Green,
    Yellow,
    Red,
}

impl QualityTier {
    pub fn all() -> Vec<Self> {
        vec![Self::Golden, Self::Green, Self::Yellow, Self::Red]
    }

    /// Display form, uppercase like the service's result page used it.
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Golden => "GOLDEN",
            QualityTier::Green => "GREEN",
            QualityTier::Yellow => "YELLOW",
            QualityTier::Red => "RED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QualityTier::Golden => "Excellent quality",
            QualityTier::Green => "Good quality",
            QualityTier::Yellow => "Fair quality",
            QualityTier::Red => "Poor quality",
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            QualityTier::Golden => "\x1b[93m", // bright yellow
            QualityTier::Green => "\x1b[32m",  // green
            QualityTier::Yellow => "\x1b[33m", // yellow
            QualityTier::Red => "\x1b[31m",    // red
        }
    }
}

/// Spectral-cutoff summary attached to the metrics.
///
/// The service has shipped two shapes of this value: a labeled object
/// `{"cutoff_range": [lo, hi], "confidence": c}` and an older ordered pair
/// `[[lo, hi], c]` still emitted by its fallback path. Both must keep
/// parsing; anything else is carried opaquely and yields no confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CutoffSummary {
    Labeled {
        confidence: f64,
        #[serde(default)]
        cutoff_range: Option<(f64, f64)>,
    },
    Pair((f64, f64), f64),
    Other(serde_json::Value),
}

impl CutoffSummary {
    /// Cutoff steepness score in [0,1], when the summary is in a
    /// recognized shape.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            CutoffSummary::Labeled { confidence, .. } => Some(*confidence),
            CutoffSummary::Pair(_, confidence) => Some(*confidence),
            CutoffSummary::Other(_) => None,
        }
    }

    /// Estimated cutoff band in Hz, when present.
    pub fn cutoff_range(&self) -> Option<(f64, f64)> {
        match self {
            CutoffSummary::Labeled { cutoff_range, .. } => *cutoff_range,
            CutoffSummary::Pair(range, _) => Some(*range),
            CutoffSummary::Other(_) => None,
        }
    }
}

/// Raw measurements for one analyzed file, as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Server-side path of the uploaded file; display only.
    pub file: String,
    /// Duration in seconds.
    #[serde(rename = "duration_sec")]
    pub duration_secs: f64,
    /// Bitrate from the MP3 header, in kbps.
    pub bitrate_kbps: u32,
    /// Sample rate in kHz.
    #[serde(rename = "sample_rate_kHz")]
    pub sample_rate_khz: f64,
    /// EBU R128 integrated loudness, in LUFS.
    #[serde(rename = "loudness_LUFS")]
    pub loudness_lufs: f64,
    /// Estimated spectral cutoff in Hz; absent or zero means the service
    /// could not determine one.
    #[serde(rename = "true_quality_estimation", default)]
    pub cutoff_hz: Option<f64>,
    #[serde(rename = "summaryCutOff", default)]
    pub cutoff_summary: Option<CutoffSummary>,
}

impl MetricsReport {
    /// Last `/`-separated segment of the reported path.
    pub fn filename(&self) -> &str {
        self.file.rsplit('/').next().unwrap_or(self.file.as_str())
    }

    /// Check the numeric fields against the contract's stated ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(format!("bad duration_sec: {}", self.duration_secs));
        }
        if self.bitrate_kbps == 0 {
            return Err("bitrate_kbps must be positive".to_string());
        }
        if !self.sample_rate_khz.is_finite() || self.sample_rate_khz <= 0.0 {
            return Err(format!("bad sample_rate_kHz: {}", self.sample_rate_khz));
        }
        Ok(())
    }
}

/// Per-metric tiers assigned by the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityRatings {
    pub bitrate_kbps: QualityTier,
    #[serde(rename = "sample_rate_kHz")]
    pub sample_rate_khz: QualityTier,
    #[serde(rename = "loudness_LUFS")]
    pub loudness_lufs: QualityTier,
}

/// Identification echoed back by the service when a lyrics lookup ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongInfo {
    #[serde(default)]
    pub song_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
}

/// Lyrics section ready for display; only constructible when the
/// visibility invariant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricsBlock<'a> {
    pub song_name: &'a str,
    pub artist_name: &'a str,
    pub lyrics: &'a str,
}

/// Validated successful analysis payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metrics: MetricsReport,
    pub quality: QualityRatings,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub song_info: Option<SongInfo>,
}

impl AnalysisReport {
    /// Lyrics are shown only when the text and both names came back
    /// non-empty together. Enforced here so no renderer can show a
    /// half-identified lyrics section.
    pub fn lyrics_block(&self) -> Option<LyricsBlock<'_>> {
        let lyrics = self.lyrics.as_deref().filter(|l| !l.is_empty())?;
        let info = self.song_info.as_ref()?;
        let song_name = info.song_name.as_deref().filter(|s| !s.is_empty())?;
        let artist_name = info.artist_name.as_deref().filter(|s| !s.is_empty())?;
        Some(LyricsBlock {
            song_name,
            artist_name,
            lyrics,
        })
    }
}

/// Top-level response envelope for `POST /api/analyse`.
///
/// The service answers failures with `success=false` plus an `error`
/// message (sometimes on a non-2xx status, body intact), so every section
/// besides `success` is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub metrics: Option<MetricsReport>,
    #[serde(default)]
    pub quality: Option<QualityRatings>,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub song_info: Option<SongInfo>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Song/artist pair sent with the upload to request a lyrics lookup.
/// Always both or neither; the upload state machine enforces the pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub song_name: String,
    pub artist_name: String,
}
