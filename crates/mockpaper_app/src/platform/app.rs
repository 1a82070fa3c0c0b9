use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::LevelFilter;
use mockpaper_core::{
    update, AppState, Msg, SelectedFile, ServiceEndpoint, DOWNLOAD_FILENAME, PROGRESS_MAX_STEP,
    PROGRESS_TICK_INTERVAL,
};
use mockpaper_engine::{
    export_artifact, EngineEvent, EngineHandle, EngineSettings, GeneratorSettings, TickerSettings,
};
use mockpaper_logging::{client_error, client_info, LogDestination};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::ui::render::render;
use super::ui::terminal::TerminalSurface;
use super::ui::Surface;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    match cli.log_file.as_deref() {
        Some(path) => mockpaper_logging::initialize(LogDestination::Both(path), level),
        None => mockpaper_logging::initialize(LogDestination::Terminal, level),
    }

    let endpoint = match cli.api.as_deref() {
        Some(api) => ServiceEndpoint::new(api)?,
        None => ServiceEndpoint::from_launch(cli.launch_url.as_deref())?,
    };
    client_info!("Using generation service at {}", endpoint.base());

    let engine = EngineHandle::new(engine_settings(&endpoint)).context("starting engine")?;

    if cli.check_health {
        return check_health(&engine, &endpoint);
    }

    let mut controller = SubmissionController::new(
        EffectRunner::new(engine),
        TerminalSurface::new(std::io::stderr()),
    );
    controller.dispatch(Msg::FileChosen(cli.file.map(SelectedFile::from_path)));
    controller.dispatch(Msg::MockCountChanged(cli.mocks.unwrap_or_default()));
    controller.dispatch(Msg::DifficultySelected(Some(cli.difficulty)));
    controller.dispatch(Msg::ApiKeyChanged(cli.api_key.unwrap_or_default()));
    controller.dispatch(Msg::SubmitClicked);
    controller.run_until_settled(None);

    let Some(artifact) = controller.state().download() else {
        return Ok(ExitCode::FAILURE);
    };
    let saved = export_artifact(&artifact.location, &cli.out, DOWNLOAD_FILENAME)
        .with_context(|| format!("saving {} to {}", DOWNLOAD_FILENAME, cli.out.display()))?;
    println!("{}", saved.display());
    Ok(ExitCode::SUCCESS)
}

fn engine_settings(endpoint: &ServiceEndpoint) -> EngineSettings {
    EngineSettings {
        generator: GeneratorSettings {
            base_url: endpoint.base().to_string(),
            ..GeneratorSettings::default()
        },
        ticker: TickerSettings {
            interval: PROGRESS_TICK_INTERVAL,
            max_step: PROGRESS_MAX_STEP,
        },
    }
}

fn check_health(engine: &EngineHandle, endpoint: &ServiceEndpoint) -> anyhow::Result<ExitCode> {
    engine.check_health();
    loop {
        match engine.recv_timeout(Duration::from_secs(30)) {
            Some(EngineEvent::HealthChecked { result: Ok(true) }) => {
                println!("{} is up", endpoint.base());
                return Ok(ExitCode::SUCCESS);
            }
            Some(EngineEvent::HealthChecked { result: Ok(false) }) => {
                println!("{} reports not ok", endpoint.base());
                return Ok(ExitCode::FAILURE);
            }
            Some(EngineEvent::HealthChecked { result: Err(err) }) => {
                client_error!("Health check failed: {}", err);
                println!("{} is unreachable: {}", endpoint.base(), err);
                return Ok(ExitCode::FAILURE);
            }
            Some(_) => continue,
            None => anyhow::bail!("no answer from {}", endpoint.health_url()),
        }
    }
}

/// Owns the UI state and drives one submission at a time.
pub struct SubmissionController<S: Surface> {
    state: AppState,
    runner: EffectRunner,
    surface: S,
}

impl<S: Surface> SubmissionController<S> {
    pub fn new(runner: EffectRunner, mut surface: S) -> Self {
        let state = AppState::new();
        surface.apply(render(&state.view()));
        Self {
            state,
            runner,
            surface,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.surface.apply(render(&view));
        }
    }

    /// Pump engine events until nothing is pending and the progress bar has
    /// been hidden. Returns false if `limit` ran out first.
    pub fn run_until_settled(&mut self, limit: Option<Duration>) -> bool {
        let deadline = limit.map(|limit| Instant::now() + limit);
        while !self.state.is_settled() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return false;
            }
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
        true
    }

    #[cfg(test)]
    fn last_severity(&self) -> Option<mockpaper_core::Severity> {
        self.state.view().status.map(|status| status.severity)
    }
}
