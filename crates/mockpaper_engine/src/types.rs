use std::fmt;
use std::path::PathBuf;

pub type SubmissionId = u64;
pub type ArtifactId = u64;

/// Everything needed to post one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub file_path: PathBuf,
    pub file_name: String,
    /// Text fields of the multipart body, in send order.
    pub fields: Vec<(String, String)>,
}

/// An archive staged on disk and offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub id: ArtifactId,
    pub path: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ProgressTick {
        submission_id: SubmissionId,
        increment: f64,
    },
    GenerationCompleted {
        submission_id: SubmissionId,
        result: Result<StoredArtifact, GenerateError>,
    },
    HideElapsed {
        submission_id: SubmissionId,
    },
    HealthChecked {
        result: Result<bool, GenerateError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenerateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => f.write_str("service address is not a valid URL"),
            FailureKind::HttpStatus(code) => write!(f, "service answered HTTP {code}"),
            FailureKind::Timeout => f.write_str("request timed out"),
            FailureKind::TooLarge {
                max_bytes,
                actual: Some(actual),
            } => write!(f, "archive of {actual} bytes exceeds the {max_bytes} byte limit"),
            FailureKind::TooLarge { max_bytes, .. } => {
                write!(f, "archive exceeds the {max_bytes} byte limit")
            }
            FailureKind::Io => f.write_str("could not read the selected file"),
            FailureKind::Network => f.write_str("could not reach the service"),
        }
    }
}
