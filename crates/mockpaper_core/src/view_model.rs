use std::path::PathBuf;

use crate::{ProgressOutcome, StatusMessage};

/// Suggested name for every downloaded archive.
pub const DOWNLOAD_FILENAME: &str = "mockpapers.zip";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressView {
    pub visible: bool,
    pub percent: f64,
    pub outcome: ProgressOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinkView {
    pub file_name: String,
    pub href: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub status: Option<StatusMessage>,
    pub progress: ProgressView,
    pub submit_enabled: bool,
    pub download: Option<DownloadLinkView>,
    pub dirty: bool,
}
