pub mod constants;
pub mod render;
pub mod terminal;

use mockpaper_core::{DownloadLinkView, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    Neutral,
    Success,
    Failure,
}

/// One change to the presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    UpdateStatus { text: String, severity: Severity },
    ClearStatus,
    SetProgress {
        visible: bool,
        percent: f64,
        tone: ProgressTone,
    },
    SetSubmitEnabled(bool),
    ReplaceDownloadLink(Option<DownloadLinkView>),
}

pub trait Surface {
    fn apply(&mut self, commands: Vec<UiCommand>);
}
