//! Upload orchestration: the session state machine and its driver.

mod orchestrator;
mod state;

pub use orchestrator::UploadOrchestrator;
pub use state::{declared_media_type, step, UploadEvent, UploadState};
