use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::{NaiveDate, Utc};
use scout_core::{BatchEntry, BatchFailure, Effect, ExportKind, Msg};
use scout_engine::{
    write_csv_export, BatchClient, ClipboardChain, ClipboardOutcome, CompanyResult, EngineError,
    EngineEvent, EngineHandle, FailureKind, SubmitError,
};
use scout_logging::{scout_debug, scout_info};

/// Supplies the date stamped into export file names.
pub(crate) type DateSource = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub(crate) fn utc_today() -> DateSource {
    Arc::new(|| Utc::now().date_naive())
}

/// Executes effects from the core and feeds their outcomes back as messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    clipboard: ClipboardChain,
    output_dir: PathBuf,
    today: DateSource,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub(crate) fn new(
        client: Arc<dyn BatchClient>,
        clipboard: ClipboardChain,
        output_dir: PathBuf,
        today: DateSource,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::spawn(client, event_tx)?;
        spawn_event_forwarder(event_rx, msg_tx.clone());
        Ok(Self {
            engine,
            clipboard,
            output_dir,
            today,
            msg_tx,
        })
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitBatch {
                    submission,
                    targets,
                } => {
                    scout_info!(
                        "SubmitBatch submission={} targets={}",
                        submission,
                        targets.len()
                    );
                    self.engine.submit(submission, targets);
                }
                Effect::WriteCsv { contents, rows } => {
                    let date = (self.today)();
                    let result = write_csv_export(&self.output_dir, date, &contents, rows)
                        .map(|export| {
                            format!(
                                "Saved {} rows to {}",
                                export.row_count,
                                export.path.display()
                            )
                        })
                        .map_err(|err| err.to_string());
                    self.send(Msg::ExportFinished {
                        kind: ExportKind::Csv,
                        result,
                    });
                }
                Effect::CopyToClipboard { text } => {
                    let result = self
                        .clipboard
                        .copy(&text)
                        .map(|outcome| {
                            if outcome == ClipboardOutcome::Fallback {
                                scout_debug!("Table copied through the fallback clipboard");
                            }
                            "Copied!".to_string()
                        })
                        .map_err(|err| err.to_string());
                    self.send(Msg::ExportFinished {
                        kind: ExportKind::Clipboard,
                        result,
                    });
                }
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }
}

fn spawn_event_forwarder(event_rx: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BatchCompleted { submission, result } => Msg::BatchCompleted {
            submission,
            result: result
                .map(|rows| rows.into_iter().map(map_entry).collect())
                .map_err(map_failure),
        },
    }
}

fn map_entry(row: CompanyResult) -> BatchEntry {
    BatchEntry::new(row.url, row.employee_count, row.error)
}

pub(crate) fn map_failure(err: SubmitError) -> BatchFailure {
    match err.kind {
        FailureKind::Validation => BatchFailure::Validation(err.message),
        FailureKind::Timeout => BatchFailure::Timeout,
        FailureKind::HttpStatus(status) => BatchFailure::Server {
            status,
            body: err.message,
        },
        FailureKind::Application => BatchFailure::Application(err.message),
        FailureKind::Network => BatchFailure::Network(err.message),
        FailureKind::InvalidEndpoint => BatchFailure::Network(err.to_string()),
        FailureKind::Decode | FailureKind::TooLarge { .. } => {
            BatchFailure::Decode(err.to_string())
        }
    }
}
