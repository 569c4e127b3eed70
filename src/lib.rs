//! MP3Checkr - Terminal client for an MP3 quality analysis service
//!
//! Uploads MP3 files to an analysis server and renders the returned report:
//! bitrate, sample rate and loudness ratings, the measured spectral cutoff,
//! and a rule-based reading of what source the audio most likely came from.
//!
//! ## Features
//!
//! - **Upload sessions as a state machine**: at most one request in flight,
//!   with validation errors surfaced before any network traffic
//! - **Tolerant wire contract**: accepts both published `summaryCutOff`
//!   shapes (labeled object and legacy pair) without failing the report
//! - **Rule-based interpretation**: cutoff shape and likely audio origin
//!   derived from the measured cutoff frequency alone
//! - **Terminal report cards**: tier-colored metrics with a legend, plus
//!   optional lyrics when the service returns a complete block
//!
//! ## Module Structure
//!
//! - `service` - Wire contract types and the blocking HTTP client
//! - `upload` - Upload session state machine and its driver
//! - `classify` - Pure classification rules over returned metrics
//! - `cli` - Terminal rendering
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use mp3checkr::service::AnalysisClient;
//! use mp3checkr::upload::{UploadOrchestrator, UploadState};
//!
//! let client = AnalysisClient::new("http://localhost:8080", Duration::from_secs(120))?;
//! let mut session = UploadOrchestrator::new(client);
//!
//! session.choose_file("track.mp3");
//! match session.submit("Song", "Artist") {
//!     UploadState::Succeeded { report } => println!("{} kbps", report.metrics.bitrate_kbps),
//!     state => eprintln!("{:?}", state.error()),
//! }
//! ```

// Pure classification rules
pub mod classify;

// Terminal rendering
pub mod cli;

// Wire contract and HTTP client
pub mod service;

// Upload session state machine
pub mod upload;

// Re-export commonly used types at crate root for convenience
pub use classify::{CutoffShape, LikelyOrigin, QualityAssessment};
pub use service::{AnalysisClient, AnalysisReport, MetricsReport, QualityTier, SubmitError};
pub use upload::{UploadEvent, UploadOrchestrator, UploadState};
