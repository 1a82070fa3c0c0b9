use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the request and run the progress ticker until it resolves.
    SendGeneration {
        submission_id: crate::SubmissionId,
        request: crate::GenerationRequest,
    },
    /// Deliver `Msg::ProgressHideElapsed` after `delay`.
    ScheduleProgressHide {
        submission_id: crate::SubmissionId,
        delay: Duration,
    },
    /// Drop a staged archive that is no longer offered for download.
    ReleaseArtifact { artifact: crate::DownloadArtifact },
}
