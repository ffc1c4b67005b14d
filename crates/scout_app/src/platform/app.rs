use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use scout_core::{update, BatchViewModel, ControllerPhase, ControllerState, Msg};
use scout_engine::{image_mime_for, BatchClient, ClipboardChain, EngineError, ReqwestClient};
use scout_logging::{level_for, scout_info, scout_warn};

use super::config::{load_config, AppConfig, ConfigOverrides};
use super::effects::{map_failure, utc_today, DateSource, EffectRunner};
use super::{logging, render};
use crate::cli::{Cli, Command};

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::initialize(cli.log, level_for(cli.verbose));

    let config = load_config(cli.config.as_deref()).with_overrides(ConfigOverrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        output_dir: cli.output_dir,
    });
    scout_info!(
        "Using server {} (timeout {}s)",
        config.base_url,
        config.timeout_secs
    );

    match cli.command {
        Command::Scrape { input, csv, copy } => {
            let raw = read_targets(input.as_deref())?;
            run_scrape(&config, &raw, ScrapeOptions { csv, copy })
        }
        Command::Gather { url, copy } => run_gather(&config, &url, copy),
        Command::Ocr { image, copy } => run_ocr(&config, &image, copy),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScrapeOptions {
    pub csv: bool,
    pub copy: bool,
}

fn run_scrape(config: &AppConfig, raw: &str, options: ScrapeOptions) -> anyhow::Result<ExitCode> {
    let client = ReqwestClient::new(config.client_settings()).map_err(EngineError::Client)?;
    let mut session = ScrapeSession::new(
        Arc::new(client),
        ClipboardChain::system_default(),
        config.output_dir.clone(),
        utc_today(),
    )?;

    let view = session.run(raw, options)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(render::render_table(&view).as_bytes())?;
    for line in render::render_status(&view) {
        eprintln!("{line}");
    }

    if view.phase == ControllerPhase::Rendered && view.error_message.is_none() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Owns the controller state and drives it with messages from the user
/// actions and from the effect runner until the batch settles.
pub(crate) struct ScrapeSession {
    state: ControllerState,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl ScrapeSession {
    pub(crate) fn new(
        client: Arc<dyn BatchClient>,
        clipboard: ClipboardChain,
        output_dir: PathBuf,
        today: DateSource,
    ) -> Result<Self, EngineError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(client, clipboard, output_dir, today, msg_tx)?;
        Ok(Self {
            state: ControllerState::new(),
            effects,
            msg_rx,
        })
    }

    pub(crate) fn run(&mut self, raw: &str, options: ScrapeOptions) -> anyhow::Result<BatchViewModel> {
        self.dispatch(Msg::InputChanged(raw.to_string()));
        self.dispatch(Msg::SubmitClicked);
        self.wait_for_batch()?;

        if self.state.phase() == ControllerPhase::Rendered {
            if options.csv {
                self.dispatch(Msg::ExportCsvClicked);
                self.drain_ready();
                self.report_transient();
            }
            if options.copy {
                self.dispatch(Msg::CopyTableClicked);
                self.drain_ready();
                self.report_transient();
            }
        }
        Ok(self.state.view())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            if let Some(loading) = state.view().loading_text() {
                eprintln!("{loading}");
            }
        }
        self.state = state;
        self.effects.enqueue(effects);
    }

    /// Blocks until the in-flight batch resolves. The engine enforces the
    /// request deadline and reports a crashed request as a failure, so a
    /// completion always arrives.
    fn wait_for_batch(&mut self) -> anyhow::Result<()> {
        while self.state.phase() == ControllerPhase::Submitting {
            let msg = self
                .msg_rx
                .recv()
                .context("engine stopped before the batch completed")?;
            self.dispatch(msg);
        }
        Ok(())
    }

    /// Applies messages that synchronous effects have already queued.
    fn drain_ready(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    /// Prints export confirmations and failures as they happen, since the
    /// view only keeps the latest one.
    fn report_transient(&self) {
        let view = self.state.view();
        if let Some(error) = &view.error_message {
            scout_warn!("{}", error);
            eprintln!("{error}");
        } else if let Some(notice) = &view.notice {
            eprintln!("{notice}");
        }
    }
}

fn run_gather(config: &AppConfig, url: &str, copy: bool) -> anyhow::Result<ExitCode> {
    let client = ReqwestClient::new(config.client_settings()).map_err(EngineError::Client)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match runtime.block_on(client.gather(url)) {
        Ok(info) => {
            print!("{}", render::render_page_info(&info));
            if copy {
                copy_text(info.content.as_deref().unwrap_or_default());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", map_failure(err).user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_ocr(config: &AppConfig, image: &Path, copy: bool) -> anyhow::Result<ExitCode> {
    let bytes = fs::read(image).with_context(|| format!("failed to read {}", image.display()))?;
    let client = ReqwestClient::new(config.client_settings()).map_err(EngineError::Client)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match runtime.block_on(client.extract_text(&bytes, image_mime_for(image))) {
        Ok(extracted) => {
            print!("{}", render::render_extracted_text(&extracted));
            if copy {
                copy_text(&extracted.text);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", map_failure(err).user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn copy_text(text: &str) {
    match ClipboardChain::system_default().copy(text) {
        Ok(_) => eprintln!("Copied!"),
        Err(err) => eprintln!("Copy failed: {err}"),
    }
}

fn read_targets(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read targets from {}", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read targets from stdin")?;
            Ok(raw)
        }
    }
}
