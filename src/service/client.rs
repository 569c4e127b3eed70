// src/service/client.rs
//
// Blocking HTTP client for the external analysis service.
// One multipart upload per call; no retries, no queuing.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart;
use thiserror::Error;

use super::models::{AnalysisReport, HealthStatus, ServiceEnvelope, TrackTags};

/// Why a submission attempt did not produce a report.
///
/// The display strings are user-facing: a service-reported failure is
/// surfaced verbatim, everything transport-shaped collapses into one fixed
/// message so the two are distinguishable at a glance.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The local file could not be opened or read; nothing was sent.
    #[error("Could not read {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The service answered with `success=false`.
    #[error("{}", .0.as_deref().unwrap_or("Analysis failed"))]
    Rejected(Option<String>),
    /// The service was unreachable, timed out, or its reply could not be
    /// read as JSON.
    #[error("Could not reach the analysis service")]
    Unreachable(#[source] reqwest::Error),
    /// `success=true` but the payload was missing or out of contract.
    #[error("The analysis service returned an invalid report: {0}")]
    BadReport(String),
}

/// Client for the analysis service's HTTP API.
pub struct AnalysisClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each whole request, upload included. There is no
    /// other cancellation path: a submission either completes or hits this
    /// deadline and surfaces as unreachable.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload one MP3 for analysis, with the optional song/artist pair for
    /// the lyrics lookup, and return the validated report.
    pub fn analyse(
        &self,
        file: &Path,
        tags: Option<&TrackTags>,
    ) -> Result<AnalysisReport, SubmitError> {
        // reqwest declares the part's media type from the extension, the
        // same declaration a browser picker would make.
        let mut form = multipart::Form::new().file("file", file).map_err(|source| {
            SubmitError::FileRead {
                path: file.display().to_string(),
                source,
            }
        })?;

        if let Some(tags) = tags {
            form = form
                .text("songName", tags.song_name.clone())
                .text("artistName", tags.artist_name.clone());
        }

        let url = format!("{}/api/analyse", self.base_url);
        log::debug!("POST {} ({})", url, file.display());

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(SubmitError::Unreachable)?;

        let status = response.status();
        // Failure envelopes can ride on a non-2xx status with the body
        // intact, so the body is decoded before the status is judged.
        let envelope: ServiceEnvelope = response.json().map_err(SubmitError::Unreachable)?;
        log::debug!("analysis response: HTTP {status}, success={}", envelope.success);

        if !envelope.success {
            return Err(SubmitError::Rejected(
                envelope.error.filter(|msg| !msg.is_empty()),
            ));
        }

        let metrics = envelope
            .metrics
            .ok_or_else(|| SubmitError::BadReport("missing metrics section".to_string()))?;
        metrics.validate().map_err(SubmitError::BadReport)?;
        let quality = envelope
            .quality
            .ok_or_else(|| SubmitError::BadReport("missing quality section".to_string()))?;

        Ok(AnalysisReport {
            metrics,
            quality,
            lyrics: envelope.lyrics,
            song_info: envelope.song_info,
        })
    }

    /// Probe `GET /api/health`.
    pub fn health(&self) -> Result<HealthStatus, SubmitError> {
        let url = format!("{}/api/health", self.base_url);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().map_err(SubmitError::Unreachable)?;

        if !response.status().is_success() {
            return Err(SubmitError::Rejected(Some(format!(
                "Health check failed with status: {}",
                response.status()
            ))));
        }

        response.json().map_err(SubmitError::Unreachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AnalysisClient::new("http://localhost:8080", Duration::from_secs(120)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_trailing_slash_removal() {
        let client =
            AnalysisClient::new("http://localhost:8080/", Duration::from_secs(120)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_rejected_message_is_verbatim_with_fallback() {
        let with_msg = SubmitError::Rejected(Some("Only MP3 files are allowed".to_string()));
        assert_eq!(with_msg.to_string(), "Only MP3 files are allowed");

        let without_msg = SubmitError::Rejected(None);
        assert_eq!(without_msg.to_string(), "Analysis failed");
    }

    #[test]
    fn test_transport_message_is_fixed() {
        let err = AnalysisClient::new("http://127.0.0.1:1", Duration::from_millis(200))
            .unwrap()
            .health()
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not reach the analysis service");
    }
}
