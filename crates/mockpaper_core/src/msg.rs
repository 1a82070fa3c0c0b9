#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked (or cleared) the file to upload.
    FileChosen(Option<crate::SelectedFile>),
    /// User edited the mock count field.
    MockCountChanged(String),
    /// User changed the difficulty selection.
    DifficultySelected(Option<crate::Difficulty>),
    /// User edited the API key field.
    ApiKeyChanged(String),
    /// User pressed Submit.
    SubmitClicked,
    /// Timer tick for the simulated progress of a pending submission.
    ProgressTick {
        submission_id: crate::SubmissionId,
        increment: f64,
    },
    /// The generation request resolved.
    GenerationCompleted {
        submission_id: crate::SubmissionId,
        result: Result<crate::DownloadArtifact, crate::SubmissionError>,
    },
    /// The finished progress bar has been shown long enough.
    ProgressHideElapsed { submission_id: crate::SubmissionId },
    /// Fallback for placeholder wiring.
    NoOp,
}
