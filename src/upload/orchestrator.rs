// src/upload/orchestrator.rs
//
// Drives the upload state machine against the real service client.
// Synchronous from the caller's perspective: an accepted submit issues
// exactly one blocking request and feeds its outcome back as an event.

use std::mem;
use std::path::Path;

use crate::service::AnalysisClient;

use super::state::{declared_media_type, step, UploadEvent, UploadState};

pub struct UploadOrchestrator {
    client: AnalysisClient,
    state: UploadState,
}

impl UploadOrchestrator {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            state: UploadState::default(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Select a file, validating its declared media type.
    pub fn choose_file<P: AsRef<Path>>(&mut self, path: P) -> &UploadState {
        let path = path.as_ref().to_path_buf();
        let media_type = declared_media_type(&path).map(str::to_string);
        self.apply(UploadEvent::FileChosen { path, media_type })
    }

    /// Submit the selected file with the raw optional song/artist fields.
    ///
    /// Refused while a request is in flight; otherwise an accepted submit
    /// runs the whole request before returning. No queuing, no retry.
    pub fn submit(&mut self, song_name: &str, artist_name: &str) -> &UploadState {
        if self.state.in_flight() {
            log::warn!("submit refused: a submission is already in flight");
            return &self.state;
        }

        self.apply(UploadEvent::Submit {
            song_name: song_name.to_string(),
            artist_name: artist_name.to_string(),
        });

        // Only a transition into Submitting triggers the one network call.
        if let UploadState::Submitting { file, tags } = &self.state {
            log::info!("submitting {} for analysis", file.display());
            let completion = match self.client.analyse(file, tags.as_ref()) {
                Ok(report) => UploadEvent::ServiceSucceeded(Box::new(report)),
                Err(err) => UploadEvent::ServiceFailed(err.to_string()),
            };
            self.apply(completion);
        }

        &self.state
    }

    /// Back to idle, dropping any held report or error.
    pub fn reset(&mut self) -> &UploadState {
        self.apply(UploadEvent::Reset)
    }

    fn apply(&mut self, event: UploadEvent) -> &UploadState {
        let state = mem::take(&mut self.state);
        let before = state.name();
        self.state = step(state, event);
        if before != self.state.name() {
            log::debug!("upload session: {} -> {}", before, self.state.name());
        }
        &self.state
    }
}
