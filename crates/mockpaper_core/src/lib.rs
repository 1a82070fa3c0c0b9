//! Mockpaper core: pure submission state machine and view-model helpers.
mod effect;
mod endpoint;
mod error;
mod form;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use endpoint::{ServiceEndpoint, DEFAULT_BASE_URL};
pub use error::{EndpointError, SubmissionError};
pub use form::{
    parse_mock_count, Difficulty, FormInput, GenerationRequest, SelectedFile, SubmissionOptions,
    LANGUAGE,
};
pub use msg::Msg;
pub use progress::{
    ProgressOutcome, ProgressState, PROGRESS_CAP, PROGRESS_FLOOR, PROGRESS_HIDE_DELAY,
    PROGRESS_MAX_STEP, PROGRESS_TICK_INTERVAL,
};
pub use state::{AppState, ArtifactId, DownloadArtifact, Severity, StatusMessage, SubmissionId};
pub use update::update;
pub use view_model::{AppViewModel, DownloadLinkView, ProgressView, DOWNLOAD_FILENAME};
