use crate::{
    AppState, Effect, Msg, ProgressOutcome, Severity, StatusMessage, SubmissionError,
    PROGRESS_HIDE_DELAY,
};

const STATUS_GENERATING: &str = "Generating mock papers... this can take a minute.";
const STATUS_DONE: &str = "Done! Your mock papers are ready.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(file) => {
            state.form_mut().file = file;
            Vec::new()
        }
        Msg::MockCountChanged(raw) => {
            state.form_mut().mock_count = raw;
            Vec::new()
        }
        Msg::DifficultySelected(difficulty) => {
            state.form_mut().difficulty = difficulty;
            Vec::new()
        }
        Msg::ApiKeyChanged(raw) => {
            state.form_mut().api_key = raw;
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::ProgressTick {
            submission_id,
            increment,
        } => {
            if state.is_in_flight(submission_id) {
                state.advance_progress(increment);
            }
            Vec::new()
        }
        Msg::GenerationCompleted {
            submission_id,
            result,
        } => {
            if !state.is_in_flight(submission_id) {
                // Stale completion: never let it touch the UI, but do not
                // leak whatever it staged.
                return match result {
                    Ok(artifact) => (state, vec![Effect::ReleaseArtifact { artifact }]),
                    Err(_) => (state, Vec::new()),
                };
            }
            let outcome = match result {
                Ok(artifact) => {
                    state.set_download(artifact);
                    state.set_status(StatusMessage::new(STATUS_DONE, Severity::Success));
                    ProgressOutcome::Success
                }
                Err(err) => {
                    state.set_status(failure_status(&err));
                    ProgressOutcome::Failure
                }
            };
            state.end_submission(outcome);
            vec![Effect::ScheduleProgressHide {
                submission_id,
                delay: PROGRESS_HIDE_DELAY,
            }]
        }
        Msg::ProgressHideElapsed { submission_id } => {
            if state.is_current(submission_id) && state.in_flight().is_none() {
                state.hide_progress();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.in_flight().is_some() {
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    if let Some(artifact) = state.take_download() {
        effects.push(Effect::ReleaseArtifact { artifact });
    }
    state.set_status(StatusMessage::new(STATUS_GENERATING, Severity::Info));
    let submission_id = state.begin_submission();

    match state.form().to_request(submission_id) {
        Ok(request) => {
            state.set_in_flight(submission_id);
            effects.push(Effect::SendGeneration {
                submission_id,
                request,
            });
        }
        Err(err) => {
            state.set_status(failure_status(&err));
            state.end_submission(ProgressOutcome::Failure);
            effects.push(Effect::ScheduleProgressHide {
                submission_id,
                delay: PROGRESS_HIDE_DELAY,
            });
        }
    }
    effects
}

fn failure_status(err: &SubmissionError) -> StatusMessage {
    if err.is_validation() {
        StatusMessage::new(err.to_string(), Severity::Warning)
    } else {
        StatusMessage::new(format!("Error: {err}"), Severity::Danger)
    }
}
