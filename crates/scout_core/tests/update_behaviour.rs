use pretty_assertions::assert_eq;
use scout_core::{
    update, BatchEntry, BatchFailure, ControllerPhase, ControllerState, Effect, Msg, RowStatus,
};

fn init_logging() {
    scout_logging::initialize_for_tests();
}

fn submit(state: ControllerState, input: &str) -> (ControllerState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn submission_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitBatch { submission, .. } => Some(*submission),
            _ => None,
        })
        .expect("submit effect")
}

fn sample_results() -> Vec<BatchEntry> {
    vec![
        BatchEntry::new("https://x.com/a", "500", None),
        BatchEntry::new("https://x.com/b", "NA", Some("blocked".to_string())),
    ]
}

#[test]
fn submit_trims_and_drops_blank_lines() {
    init_logging();
    let (mut state, effects) = submit(ControllerState::new(), "https://x.com/a\n\nhttps://x.com/b  ");

    assert_eq!(
        effects,
        vec![Effect::SubmitBatch {
            submission: 1,
            targets: vec!["https://x.com/a".to_string(), "https://x.com/b".to_string()],
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Submitting);
    assert_eq!(view.pending_count, 2);
    assert!(!view.submit_enabled);
    assert_eq!(
        view.loading_text().as_deref(),
        Some("Processing 2 LinkedIn URLs...")
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn whitespace_only_input_never_submits() {
    init_logging();
    for input in ["", "   ", "\n\n", " \t \n  \r\n"] {
        let (state, effects) = submit(ControllerState::new(), input);
        assert!(effects.is_empty(), "input {input:?} produced effects");
        let view = state.view();
        assert_eq!(view.phase, ControllerPhase::Idle);
        assert_eq!(
            view.error_message.as_deref(),
            Some("Please enter at least one LinkedIn company URL")
        );
    }
}

#[test]
fn second_submit_while_pending_is_rejected() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\n");
    let first = submission_of(&effects);

    let (state, effects) = submit(state, "https://x.com/other\n");
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Submitting);
    assert_eq!(view.pending_count, 1);
    assert_eq!(
        view.notice.as_deref(),
        Some("A batch is already being processed")
    );

    // The original submission still completes normally.
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: first,
            result: Ok(sample_results()),
        },
    );
    assert_eq!(state.view().phase, ControllerPhase::Rendered);
}

#[test]
fn success_renders_rows_in_order() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\nhttps://x.com/b\n");
    let submission = submission_of(&effects);

    let (state, effects) = update(
        state,
        Msg::BatchCompleted {
            submission,
            result: Ok(sample_results()),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Rendered);
    assert!(view.results_visible);
    assert!(view.clear_visible);
    assert!(view.submit_enabled);
    assert_eq!(view.error_message, None);

    let rows: Vec<_> = view
        .rows
        .iter()
        .map(|row| (row.target.as_str(), row.metric.as_str(), row.status_label()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("https://x.com/a", "500", "Success"),
            ("https://x.com/b", "NA", "blocked"),
        ]
    );
    assert_eq!(view.rows[1].status, RowStatus::Error("blocked".to_string()));
}

#[test]
fn failure_surfaces_message_and_hides_table() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\n");
    let submission = submission_of(&effects);

    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission,
            result: Err(BatchFailure::Timeout),
        },
    );

    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Failed);
    assert!(view.rows.is_empty());
    assert!(view.clear_visible);
    assert!(view
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Request timed out."));
}

#[test]
fn new_success_replaces_previous_results() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\nhttps://x.com/b\n");
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: submission_of(&effects),
            result: Ok(sample_results()),
        },
    );

    let (state, effects) = submit(state, "https://x.com/c\n");
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: submission_of(&effects),
            result: Ok(vec![BatchEntry::new("https://x.com/c", "12", None)]),
        },
    );

    assert_eq!(
        state.results(),
        &[BatchEntry::new("https://x.com/c", "12", None)]
    );
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _effects) = submit(ControllerState::new(), "https://x.com/a\n");

    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: 99,
            result: Ok(sample_results()),
        },
    );
    assert_eq!(state.view().phase, ControllerPhase::Submitting);
    assert!(state.results().is_empty());
}

#[test]
fn clear_returns_to_idle_and_discards_results() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\n");
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: submission_of(&effects),
            result: Ok(sample_results()),
        },
    );

    let (state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Idle);
    assert_eq!(view.input, "");
    assert!(!view.clear_visible);
    assert!(state.results().is_empty());

    let (_state, effects) = update(state, Msg::ExportCsvClicked);
    assert!(effects.is_empty());
}

#[test]
fn clear_is_refused_while_submitting() {
    init_logging();
    let (state, _effects) = submit(ControllerState::new(), "https://x.com/a\n");
    let (state, _) = update(state, Msg::ClearClicked);

    let view = state.view();
    assert_eq!(view.phase, ControllerPhase::Submitting);
    assert_eq!(view.input, "https://x.com/a\n");
}

#[test]
fn exports_need_results() {
    init_logging();
    let (state, effects) = update(ControllerState::new(), Msg::ExportCsvClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("No results to export")
    );

    let (state, effects) = update(state, Msg::CopyTableClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("No results to copy")
    );
}

#[test]
fn export_clicks_emit_formatted_documents() {
    init_logging();
    let (state, effects) = submit(ControllerState::new(), "https://x.com/a\nhttps://x.com/b\n");
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            submission: submission_of(&effects),
            result: Ok(sample_results()),
        },
    );

    let (state, effects) = update(state, Msg::ExportCsvClicked);
    assert_eq!(
        effects,
        vec![Effect::WriteCsv {
            contents: "LinkedIn URL,Employee Count,Status\n\
                       \"https://x.com/a\",\"500\",\"Success\"\n\
                       \"https://x.com/b\",\"NA\",\"blocked\"\n"
                .to_string(),
            rows: 2,
        }]
    );

    let (_state, effects) = update(state, Msg::CopyTableClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "LinkedIn URL\tEmployee Count\tStatus\n\
                   https://x.com/a\t500\tSuccess\n\
                   https://x.com/b\tNA\tblocked\n"
                .to_string(),
        }]
    );
}

#[test]
fn export_outcome_is_reported() {
    init_logging();
    let (state, _) = update(
        ControllerState::new(),
        Msg::ExportFinished {
            kind: scout_core::ExportKind::Clipboard,
            result: Ok("Copied!".to_string()),
        },
    );
    assert_eq!(state.view().notice.as_deref(), Some("Copied!"));

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            kind: scout_core::ExportKind::Csv,
            result: Err("disk full".to_string()),
        },
    );
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("Export failed: disk full")
    );
}

#[test]
fn successful_copy_replaces_earlier_export_error() {
    init_logging();
    let (state, _) = update(
        ControllerState::new(),
        Msg::ExportFinished {
            kind: scout_core::ExportKind::Csv,
            result: Err("not a directory".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::ExportFinished {
            kind: scout_core::ExportKind::Clipboard,
            result: Ok("Copied!".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.error_message, None);
    assert_eq!(view.notice.as_deref(), Some("Copied!"));
}
