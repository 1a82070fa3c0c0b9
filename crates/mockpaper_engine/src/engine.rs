use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mockpaper_logging::{client_info, client_warn};
use thiserror::Error;

use crate::artifact::{ArtifactError, ArtifactStore};
use crate::generate::{ChannelEventSink, EventSink, Generator, GeneratorSettings, ReqwestGenerator};
use crate::ticker::{ProgressTicker, TickerSettings};
use crate::{
    ArtifactId, EngineEvent, FailureKind, GenerateError, GenerateRequest, StoredArtifact,
    SubmissionId,
};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub generator: GeneratorSettings,
    pub ticker: TickerSettings,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not start engine runtime: {0}")]
    Runtime(std::io::Error),
    #[error("could not build http client: {0}")]
    Client(GenerateError),
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),
}

enum EngineCommand {
    Generate {
        submission_id: SubmissionId,
        request: GenerateRequest,
    },
    ScheduleHide {
        submission_id: SubmissionId,
        delay: Duration,
    },
    Release {
        artifact_id: ArtifactId,
    },
    CheckHealth,
}

/// Runs generation work on a background tokio runtime.
///
/// Commands go in through the public methods; results come
/// back as [`EngineEvent`]s. Dropping the handle stops the runtime and
/// removes every staged artifact.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let generator = ReqwestGenerator::new(settings.generator).map_err(EngineError::Client)?;
        Self::with_generator(Arc::new(generator), settings.ticker)
    }

    pub fn with_generator(
        generator: Arc<dyn Generator>,
        ticker: TickerSettings,
    ) -> Result<Self, EngineError> {
        let store = Arc::new(ArtifactStore::new()?);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let job = Job {
                    generator: generator.clone(),
                    store: store.clone(),
                    sink: sink.clone(),
                    ticker,
                };
                runtime.spawn(async move {
                    job.handle(command).await;
                });
            }
            // Store (and its staging directory) goes away with the last task.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, submission_id: SubmissionId, request: GenerateRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            submission_id,
            request,
        });
    }

    pub fn schedule_hide(&self, submission_id: SubmissionId, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleHide {
            submission_id,
            delay,
        });
    }

    pub fn release(&self, artifact_id: ArtifactId) {
        let _ = self.cmd_tx.send(EngineCommand::Release { artifact_id });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

struct Job {
    generator: Arc<dyn Generator>,
    store: Arc<ArtifactStore>,
    sink: Arc<dyn EventSink>,
    ticker: TickerSettings,
}

impl Job {
    async fn handle(self, command: EngineCommand) {
        match command {
            EngineCommand::Generate {
                submission_id,
                request,
            } => {
                let result = self.run_generation(submission_id, &request).await;
                if let Err(err) = &result {
                    client_warn!("Submission {} failed: {}", submission_id, err);
                }
                self.sink.emit(EngineEvent::GenerationCompleted {
                    submission_id,
                    result,
                });
            }
            EngineCommand::ScheduleHide {
                submission_id,
                delay,
            } => {
                tokio::time::sleep(delay).await;
                self.sink.emit(EngineEvent::HideElapsed { submission_id });
            }
            EngineCommand::Release { artifact_id } => {
                self.store.release(artifact_id);
            }
            EngineCommand::CheckHealth => {
                let result = self.generator.health().await;
                self.sink.emit(EngineEvent::HealthChecked { result });
            }
        }
    }

    async fn run_generation(
        &self,
        submission_id: SubmissionId,
        request: &GenerateRequest,
    ) -> Result<StoredArtifact, GenerateError> {
        // Ticks stop on every exit path, before the completion is emitted.
        let _ticker = ProgressTicker::start(submission_id, self.ticker, self.sink.clone());
        let archive = self.generator.generate(request).await?;
        let artifact = self
            .store
            .store(&archive.bytes)
            .map_err(|err| GenerateError::new(FailureKind::Io, err.to_string()))?;
        client_info!(
            "Submission {} produced {} bytes ({})",
            submission_id,
            artifact.byte_len,
            archive.content_type.as_deref().unwrap_or("no content type")
        );
        Ok(artifact)
    }
}
