//! Upload session state machine.
//!
//! The whole client-visible flow is one explicit machine: transitions are
//! a pure function of (state, event), the current report lives in an owned
//! slot inside `Succeeded`, and there are no ambient globals. The driver
//! in `orchestrator` is the only place where I/O happens.

use std::path::{Path, PathBuf};

use crate::service::{AnalysisReport, TrackTags, MPEG_MEDIA_TYPE};

const INVALID_TYPE_MSG: &str = "Please select a valid MP3 file";
const NO_FILE_MSG: &str = "Please select an MP3 file";
const PAIR_MSG: &str = "Please provide both song name and artist name, or leave both empty";

/// Media type a file declares through its extension, mirroring the
/// declaration a file picker would attach to the selection.
pub fn declared_media_type(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mp3") => Some(MPEG_MEDIA_TYPE),
        _ => None,
    }
}

/// Everything that can happen to an upload session.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// A file was picked; `media_type` is whatever type it declares.
    FileChosen {
        path: PathBuf,
        media_type: Option<String>,
    },
    /// Submit with the raw contents of the optional song/artist fields.
    Submit {
        song_name: String,
        artist_name: String,
    },
    /// The in-flight submission produced a report.
    ServiceSucceeded(Box<AnalysisReport>),
    /// The in-flight submission failed; the message is user-facing.
    ServiceFailed(String),
    /// Discard report and errors, back to the start.
    Reset,
}

/// Session state. `error` fields carry the message the user should see.
#[derive(Debug, Clone)]
pub enum UploadState {
    /// No usable file selected.
    Idle { error: Option<String> },
    /// A valid MP3 is selected; the form may be submitted.
    Validating {
        file: PathBuf,
        error: Option<String>,
    },
    /// Exactly one request is in flight for `file`.
    Submitting {
        file: PathBuf,
        tags: Option<TrackTags>,
    },
    /// The owned report slot, held until the next reset.
    Succeeded { report: Box<AnalysisReport> },
    /// The submission failed. The file is kept so a retry needs no
    /// re-selection; only the message distinguishes a service-reported
    /// failure from a transport one.
    Failed { file: PathBuf, error: String },
}

impl Default for UploadState {
    fn default() -> Self {
        UploadState::Idle { error: None }
    }
}

impl UploadState {
    /// True while a request is outstanding.
    pub fn in_flight(&self) -> bool {
        matches!(self, UploadState::Submitting { .. })
    }

    /// Validation or failure message to surface, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            UploadState::Idle { error } | UploadState::Validating { error, .. } => error.as_deref(),
            UploadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The received report, when the last submission succeeded.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            UploadState::Succeeded { report } => Some(report),
            _ => None,
        }
    }

    /// Currently selected file, if this state holds one.
    pub fn selected_file(&self) -> Option<&Path> {
        match self {
            UploadState::Validating { file, .. }
            | UploadState::Submitting { file, .. }
            | UploadState::Failed { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Idle { .. } => "idle",
            UploadState::Validating { .. } => "validating",
            UploadState::Submitting { .. } => "submitting",
            UploadState::Succeeded { .. } => "succeeded",
            UploadState::Failed { .. } => "failed",
        }
    }
}

/// Advance the machine by one event. Pure: no I/O here. The driver issues
/// the actual request when a transition lands in `Submitting`.
pub fn step(state: UploadState, event: UploadEvent) -> UploadState {
    match (state, event) {
        // Reset wins from anywhere and discards report and errors alike.
        (_, UploadEvent::Reset) => UploadState::default(),

        // File selection. Only MPEG audio is kept; a rejected pick also
        // drops whichever file was selected before it.
        (
            UploadState::Idle { .. } | UploadState::Validating { .. } | UploadState::Failed { .. },
            UploadEvent::FileChosen { path, media_type },
        ) => {
            if media_type.as_deref() == Some(MPEG_MEDIA_TYPE) {
                UploadState::Validating { file: path, error: None }
            } else {
                UploadState::Idle {
                    error: Some(INVALID_TYPE_MSG.to_string()),
                }
            }
        }

        // Submit with a file at hand: gate on the song/artist pairing.
        // A failed session keeps its file, so retry goes through the same gate.
        (
            UploadState::Validating { file, .. } | UploadState::Failed { file, .. },
            UploadEvent::Submit {
                song_name,
                artist_name,
            },
        ) => gate_submit(file, &song_name, &artist_name),

        // Submit without a file.
        (UploadState::Idle { .. }, UploadEvent::Submit { .. }) => UploadState::Idle {
            error: Some(NO_FILE_MSG.to_string()),
        },

        // One submission at a time: a second submit is ignored, not queued.
        (state @ UploadState::Submitting { .. }, UploadEvent::Submit { .. }) => {
            log::warn!("submit ignored: a submission is already in flight");
            state
        }

        // Completion of the in-flight request.
        (UploadState::Submitting { .. }, UploadEvent::ServiceSucceeded(report)) => {
            UploadState::Succeeded { report }
        }
        (UploadState::Submitting { file, .. }, UploadEvent::ServiceFailed(error)) => {
            UploadState::Failed { file, error }
        }

        // Stale completions, picks on the results screen, and the like.
        (state, event) => {
            log::debug!("upload event ignored in state {}: {event:?}", state.name());
            state
        }
    }
}

fn gate_submit(file: PathBuf, song_name: &str, artist_name: &str) -> UploadState {
    let song = song_name.trim();
    let artist = artist_name.trim();

    // Both or neither; exactly one filled never reaches the network.
    if song.is_empty() != artist.is_empty() {
        return UploadState::Validating {
            file,
            error: Some(PAIR_MSG.to_string()),
        };
    }

    let tags = if song.is_empty() {
        None
    } else {
        Some(TrackTags {
            song_name: song.to_string(),
            artist_name: artist.to_string(),
        })
    };

    UploadState::Submitting { file, tags }
}
