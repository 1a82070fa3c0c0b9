use std::path::PathBuf;
use std::sync::Once;

use mockpaper_core::{
    update, AppState, DownloadArtifact, Effect, Msg, ProgressOutcome, SelectedFile, Severity,
    SubmissionError, DOWNLOAD_FILENAME, PROGRESS_HIDE_DELAY,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(mockpaper_logging::initialize_for_tests);
}

fn with_file(state: AppState) -> AppState {
    let (state, _) = update(
        state,
        Msg::FileChosen(Some(SelectedFile::from_path("/tmp/paper.pdf"))),
    );
    state
}

fn artifact(id: u64) -> DownloadArtifact {
    DownloadArtifact {
        id,
        location: PathBuf::from(format!("/tmp/staging/artifact-{id}.zip")),
        byte_len: 4,
    }
}

fn sent_submission(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendGeneration { submission_id, .. } => Some(*submission_id),
            _ => None,
        })
        .expect("send effect")
}

#[test]
fn submit_without_file_warns_and_sends_nothing() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SubmitClicked);
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::ScheduleProgressHide {
            submission_id: 1,
            delay: PROGRESS_HIDE_DELAY,
        }]
    );
    let status = view.status.expect("status");
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.text, "Please choose a file");
    assert!(view.submit_enabled);
    assert_eq!(state.in_flight(), None);
    assert_eq!(view.progress.percent, 100.0);
    assert_eq!(view.progress.outcome, ProgressOutcome::Failure);
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::ProgressHideElapsed { submission_id: 1 });
    assert!(!state.view().progress.visible);
    assert_eq!(state.view().progress.percent, 0.0);
    assert!(state.is_settled());
}

#[test]
fn submit_with_cleared_difficulty_is_a_validation_error() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::DifficultySelected(None));
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, Effect::SendGeneration { .. })));
    let status = state.view().status.expect("status");
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.text, "Please choose a difficulty");
}

#[test]
fn submit_with_file_disables_submit_and_sends_request() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, effects) = update(state, Msg::SubmitClicked);
    let view = state.view();

    assert_eq!(sent_submission(&effects), 1);
    assert!(!view.submit_enabled);
    assert!(state.in_flight().is_some());
    assert!(view.progress.visible);
    assert_eq!(view.progress.percent, 2.0);
    assert_eq!(view.status.expect("status").severity, Severity::Info);
    assert!(view.download.is_none());
}

#[test]
fn successful_completion_offers_single_download() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission_id = sent_submission(&effects);

    let (state, effects) = update(
        state,
        Msg::GenerationCompleted {
            submission_id,
            result: Ok(artifact(1)),
        },
    );
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::ScheduleProgressHide {
            submission_id,
            delay: PROGRESS_HIDE_DELAY,
        }]
    );
    let link = view.download.expect("download link");
    assert_eq!(link.file_name, DOWNLOAD_FILENAME);
    assert_eq!(link.href, PathBuf::from("/tmp/staging/artifact-1.zip"));
    assert_eq!(link.byte_len, 4);
    assert_eq!(view.status.expect("status").severity, Severity::Success);
    assert_eq!(view.progress.percent, 100.0);
    assert_eq!(view.progress.outcome, ProgressOutcome::Success);
    assert!(view.submit_enabled);
}

#[test]
fn server_error_shows_danger_with_status_code() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission_id = sent_submission(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id,
            result: Err(SubmissionError::Transport {
                status: 500,
                detail: Some("Pipeline error: boom".to_string()),
            }),
        },
    );
    let view = state.view();

    let status = view.status.expect("status");
    assert_eq!(status.severity, Severity::Danger);
    assert!(status.text.contains("500"));
    assert!(status.text.contains("Pipeline error: boom"));
    assert!(view.download.is_none());
    assert!(view.submit_enabled);
    assert_eq!(view.progress.outcome, ProgressOutcome::Failure);
}

#[test]
fn unexpected_error_surfaces_message_text() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission_id = sent_submission(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id,
            result: Err(SubmissionError::Unexpected("connection refused".to_string())),
        },
    );

    let status = state.view().status.expect("status");
    assert_eq!(status.severity, Severity::Danger);
    assert_eq!(status.text, "Error: connection refused");
}

#[test]
fn second_submit_while_pending_is_ignored() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::SubmitClicked);
    let before = state.view();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
    assert_eq!(state.in_flight(), Some(1));
}

#[test]
fn stale_completion_is_ignored_and_its_artifact_released() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Err(SubmissionError::Transport {
                status: 502,
                detail: None,
            }),
        },
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(sent_submission(&effects), 2);
    let before = state.view();

    let (state, effects) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Ok(artifact(9)),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ReleaseArtifact {
            artifact: artifact(9)
        }]
    );
    assert_eq!(state.view(), before);
    assert_eq!(state.view().progress.outcome, ProgressOutcome::None);
}

#[test]
fn new_submission_releases_previous_download() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Ok(artifact(1)),
        },
    );
    assert!(state.view().download.is_some());

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects[0],
        Effect::ReleaseArtifact {
            artifact: artifact(1)
        }
    );
    assert_eq!(sent_submission(&effects), 2);
    assert!(state.view().download.is_none());
}

#[test]
fn hide_from_previous_submission_does_not_touch_new_progress() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Ok(artifact(1)),
        },
    );
    let (state, _) = update(state, Msg::SubmitClicked);

    let (state, _) = update(state, Msg::ProgressHideElapsed { submission_id: 1 });

    let view = state.view();
    assert!(view.progress.visible);
    assert_eq!(view.progress.percent, 2.0);
    assert!(state.in_flight().is_some());
}

#[test]
fn failure_after_success_never_mixes_outcome_and_status() {
    init_logging();
    let state = with_file(AppState::new());
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Ok(artifact(1)),
        },
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 2,
            result: Err(SubmissionError::Unexpected("boom".to_string())),
        },
    );
    // A late duplicate of the first completion must not repaint success.
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            submission_id: 1,
            result: Ok(artifact(3)),
        },
    );

    let view = state.view();
    assert_eq!(view.progress.outcome, ProgressOutcome::Failure);
    assert_eq!(view.status.expect("status").severity, Severity::Danger);
    assert!(view.download.is_none());
}
