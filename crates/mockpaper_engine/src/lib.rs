//! Mockpaper engine: HTTP generation, progress ticking and artifact handling.
mod artifact;
mod engine;
mod generate;
mod ticker;
mod types;

pub use artifact::{export_artifact, ArtifactError, ArtifactStore};
pub use engine::{EngineError, EngineHandle, EngineSettings};
pub use generate::{
    ChannelEventSink, EventSink, GeneratedArchive, Generator, GeneratorSettings, ReqwestGenerator,
};
pub use ticker::{ProgressTicker, TickerSettings};
pub use types::{
    ArtifactId, EngineEvent, FailureKind, GenerateError, GenerateRequest, StoredArtifact,
    SubmissionId,
};
