use std::fmt;
use std::num::IntErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{SubmissionError, SubmissionId};

/// Language sent with every request; the form offers no choice.
pub const LANGUAGE: &str = "en";

/// Difficulty of the generated papers relative to the uploaded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Same,
    Easier,
    Harder,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Same, Difficulty::Easier, Difficulty::Harder];

    /// Value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Same => "same",
            Difficulty::Easier => "easier",
            Difficulty::Harder => "harder",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "same" => Ok(Difficulty::Same),
            "easier" => Ok(Difficulty::Easier),
            "harder" => Ok(Difficulty::Harder),
            other => Err(format!(
                "unknown difficulty '{other}' (expected same, easier or harder)"
            )),
        }
    }
}

/// The one binary file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Self { path, file_name }
    }
}

/// Raw form contents, exactly as the user left them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub file: Option<SelectedFile>,
    pub mock_count: String,
    pub difficulty: Option<Difficulty>,
    pub api_key: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            file: None,
            mock_count: String::new(),
            // The radio group always starts with a selection.
            difficulty: Some(Difficulty::default()),
            api_key: String::new(),
        }
    }
}

impl FormInput {
    /// Validate the form and turn it into a request for the given submission.
    pub fn to_request(
        &self,
        submission_id: SubmissionId,
    ) -> Result<GenerationRequest, SubmissionError> {
        let file = self.file.clone().ok_or(SubmissionError::MissingFile)?;
        let difficulty = self.difficulty.ok_or(SubmissionError::MissingDifficulty)?;
        let api_key = if self.api_key.trim().is_empty() {
            None
        } else {
            Some(self.api_key.clone())
        };

        Ok(GenerationRequest {
            submission_id,
            file,
            options: SubmissionOptions {
                mock_count: parse_mock_count(&self.mock_count),
                difficulty,
                language: LANGUAGE,
                api_key,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOptions {
    pub mock_count: u32,
    pub difficulty: Difficulty,
    pub language: &'static str,
    pub api_key: Option<String>,
}

/// Parse the mock count field.
///
/// Blank, non-numeric and non-positive input yields 1. A positive count too
/// large for `u32` is clamped to `u32::MAX`; the service caps it further.
pub fn parse_mock_count(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(count) if count > 0 => count,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        _ => 1,
    }
}

/// A validated submission, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub submission_id: SubmissionId,
    pub file: SelectedFile,
    pub options: SubmissionOptions,
}

impl GenerationRequest {
    /// Text fields of the multipart body, in send order. The file part is
    /// added separately by the transport.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("num_mocks", self.options.mock_count.to_string()),
            ("difficulty", self.options.difficulty.as_str().to_string()),
            ("language", self.options.language.to_string()),
        ];
        if let Some(key) = &self.options.api_key {
            fields.push(("openai_api_key", key.clone()));
        }
        fields
    }
}
