use thiserror::Error;

/// Why a submission did not produce an archive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please choose a file")]
    MissingFile,
    #[error("Please choose a difficulty")]
    MissingDifficulty,
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Transport { status: u16, detail: Option<String> },
    #[error("{0}")]
    Unexpected(String),
}

impl SubmissionError {
    /// Validation failures are caught before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SubmissionError::MissingFile | SubmissionError::MissingDifficulty
        )
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("invalid service base url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}
