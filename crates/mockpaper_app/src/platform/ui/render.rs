use mockpaper_core::{AppViewModel, ProgressOutcome};

use super::{ProgressTone, UiCommand};

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    cmds.push(match &view.status {
        Some(status) => UiCommand::UpdateStatus {
            text: status.text.clone(),
            severity: status.severity,
        },
        None => UiCommand::ClearStatus,
    });

    cmds.push(UiCommand::SetProgress {
        visible: view.progress.visible,
        percent: view.progress.percent.clamp(0.0, 100.0),
        tone: tone(view.progress.outcome),
    });

    cmds.push(UiCommand::SetSubmitEnabled(view.submit_enabled));

    cmds.push(UiCommand::ReplaceDownloadLink(view.download.clone()));

    cmds
}

fn tone(outcome: ProgressOutcome) -> ProgressTone {
    match outcome {
        ProgressOutcome::None => ProgressTone::Neutral,
        ProgressOutcome::Success => ProgressTone::Success,
        ProgressOutcome::Failure => ProgressTone::Failure,
    }
}
