use scout_logging::{scout_debug, scout_info, scout_warn};

use crate::state::EMPTY_INPUT_MESSAGE;
use crate::{
    parse_targets, to_clipboard_table, to_csv, ControllerPhase, ControllerState, Effect,
    ExportKind, Msg,
};

const BUSY_MESSAGE: &str = "A batch is already being processed";
const NOTHING_TO_EXPORT: &str = "No results to export";
const NOTHING_TO_COPY: &str = "No results to copy";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ControllerState, msg: Msg) -> (ControllerState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.phase() == ControllerPhase::Submitting {
                scout_warn!("Submit ignored: a batch is already in flight");
                state.show_notice(BUSY_MESSAGE);
                return (state, Vec::new());
            }
            let targets = parse_targets(state.input());
            if targets.is_empty() {
                state.show_error(EMPTY_INPUT_MESSAGE);
                return (state, Vec::new());
            }
            match state.begin_submission(targets.len()) {
                Some(submission) => {
                    scout_info!(
                        "Submitting batch {} with {} targets",
                        submission,
                        targets.len()
                    );
                    vec![Effect::SubmitBatch {
                        submission,
                        targets,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::BatchCompleted { submission, result } => {
            if !state.is_pending(submission) {
                scout_debug!("Dropping completion for stale batch {}", submission);
                return (state, Vec::new());
            }
            match result {
                Ok(results) => {
                    scout_info!("Batch {} returned {} rows", submission, results.len());
                    state.complete_success(results);
                }
                Err(failure) => {
                    scout_warn!("Batch {} failed: {:?}", submission, failure);
                    state.complete_failure(&failure);
                }
            }
            Vec::new()
        }
        Msg::ExportCsvClicked => {
            if state.results().is_empty() {
                state.show_error(NOTHING_TO_EXPORT);
                Vec::new()
            } else {
                vec![Effect::WriteCsv {
                    contents: to_csv(state.results()),
                    rows: state.results().len(),
                }]
            }
        }
        Msg::CopyTableClicked => {
            if state.results().is_empty() {
                state.show_error(NOTHING_TO_COPY);
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard {
                    text: to_clipboard_table(state.results()),
                }]
            }
        }
        Msg::ExportFinished { kind, result } => {
            match result {
                Ok(confirmation) => state.show_notice(confirmation),
                Err(message) => {
                    scout_warn!("{:?} export failed: {}", kind, message);
                    let prefix = match kind {
                        ExportKind::Csv => "Export failed",
                        ExportKind::Clipboard => "Copy failed",
                    };
                    state.show_error(format!("{prefix}: {message}"));
                }
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            if state.phase() == ControllerPhase::Submitting {
                state.show_notice(BUSY_MESSAGE);
            } else {
                state.clear();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
