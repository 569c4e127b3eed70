//! The external analysis service: wire contract and HTTP client.

mod client;
mod models;

pub use client::{AnalysisClient, SubmitError};
pub use models::{
    AnalysisReport, CutoffSummary, HealthStatus, LyricsBlock, MetricsReport, QualityRatings,
    QualityTier, ServiceEnvelope, SongInfo, TrackTags, MPEG_MEDIA_TYPE,
};
