use std::time::Duration;

use mockpaper_core::{DownloadArtifact, Effect, GenerationRequest, Msg, SubmissionError};
use mockpaper_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerateError, GenerateRequest, StoredArtifact,
};
use mockpaper_logging::{client_info, client_warn};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendGeneration {
                    submission_id,
                    request,
                } => {
                    client_info!(
                        "SendGeneration submission_id={} file={:?} fields={}",
                        submission_id,
                        request.file.path,
                        request.form_fields().len()
                    );
                    self.engine.generate(submission_id, to_engine_request(&request));
                }
                Effect::ScheduleProgressHide {
                    submission_id,
                    delay,
                } => {
                    self.engine.schedule_hide(submission_id, delay);
                }
                Effect::ReleaseArtifact { artifact } => {
                    self.engine.release(artifact.id);
                }
            }
        }
    }

    /// Wait up to `timeout` for the next engine event that maps to a message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        match event {
            EngineEvent::ProgressTick {
                submission_id,
                increment,
            } => Some(Msg::ProgressTick {
                submission_id,
                increment,
            }),
            EngineEvent::GenerationCompleted {
                submission_id,
                result,
            } => Some(Msg::GenerationCompleted {
                submission_id,
                result: result.map(map_artifact).map_err(map_error),
            }),
            EngineEvent::HideElapsed { submission_id } => {
                Some(Msg::ProgressHideElapsed { submission_id })
            }
            EngineEvent::HealthChecked { result } => {
                client_warn!("Unexpected health result during submission: {:?}", result);
                None
            }
        }
    }
}

fn to_engine_request(request: &GenerationRequest) -> GenerateRequest {
    GenerateRequest {
        file_path: request.file.path.clone(),
        file_name: request.file.file_name.clone(),
        fields: request
            .form_fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

fn map_artifact(artifact: StoredArtifact) -> DownloadArtifact {
    DownloadArtifact {
        id: artifact.id,
        location: artifact.path,
        byte_len: artifact.byte_len,
    }
}

fn map_error(err: GenerateError) -> SubmissionError {
    match err.kind {
        FailureKind::HttpStatus(status) => SubmissionError::Transport {
            status,
            detail: Some(err.message).filter(|message| !message.trim().is_empty()),
        },
        _ if err.message.trim().is_empty() => SubmissionError::Unexpected(err.kind.to_string()),
        _ => SubmissionError::Unexpected(err.message),
    }
}
