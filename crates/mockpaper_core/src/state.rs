use std::path::PathBuf;

use crate::progress::{ProgressOutcome, ProgressState};
use crate::view_model::{AppViewModel, DownloadLinkView, ProgressView, DOWNLOAD_FILENAME};
use crate::FormInput;

pub type SubmissionId = u64;
pub type ArtifactId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// A generated archive staged for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub id: ArtifactId,
    pub location: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    form: FormInput,
    next_submission_id: SubmissionId,
    /// Most recent submission; owns the progress bar until it is hidden.
    current_submission: Option<SubmissionId>,
    in_flight: Option<SubmissionId>,
    status: Option<StatusMessage>,
    progress: ProgressState,
    download: Option<DownloadArtifact>,
    submit_enabled: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormInput::default(),
            next_submission_id: 1,
            current_submission: None,
            in_flight: None,
            status: None,
            progress: ProgressState::default(),
            download: None,
            submit_enabled: true,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status.clone(),
            progress: ProgressView {
                visible: self.progress.is_visible(),
                percent: self.progress.percent(),
                outcome: self.progress.outcome(),
            },
            submit_enabled: self.submit_enabled,
            download: self.download.as_ref().map(|artifact| DownloadLinkView {
                file_name: DOWNLOAD_FILENAME.to_string(),
                href: artifact.location.clone(),
                byte_len: artifact.byte_len,
            }),
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn download(&self) -> Option<&DownloadArtifact> {
        self.download.as_ref()
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Nothing pending and the progress bar has been put away.
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_none() && !self.progress.is_visible()
    }

    /// Returns whether a render is due, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    /// Allocate an id for a new submission and make it current.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.current_submission = Some(id);
        self.submit_enabled = false;
        self.progress.start();
        self.mark_dirty();
        id
    }

    pub(crate) fn set_in_flight(&mut self, submission_id: SubmissionId) {
        self.in_flight = Some(submission_id);
    }

    pub(crate) fn is_in_flight(&self, submission_id: SubmissionId) -> bool {
        self.in_flight == Some(submission_id)
    }

    pub(crate) fn is_current(&self, submission_id: SubmissionId) -> bool {
        self.current_submission == Some(submission_id)
    }

    /// Close out the current submission, whatever its outcome.
    pub(crate) fn end_submission(&mut self, outcome: ProgressOutcome) {
        self.in_flight = None;
        self.submit_enabled = true;
        self.progress.finish(outcome);
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn take_download(&mut self) -> Option<DownloadArtifact> {
        let previous = self.download.take();
        if previous.is_some() {
            self.mark_dirty();
        }
        previous
    }

    pub(crate) fn set_download(&mut self, artifact: DownloadArtifact) {
        self.download = Some(artifact);
        self.mark_dirty();
    }

    pub(crate) fn advance_progress(&mut self, increment: f64) {
        if self.progress.advance(increment) {
            self.mark_dirty();
        }
    }

    pub(crate) fn hide_progress(&mut self) {
        self.progress.reset();
        self.mark_dirty();
    }
}
