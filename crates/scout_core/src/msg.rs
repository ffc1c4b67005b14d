use crate::{BatchEntry, BatchFailure, ExportKind, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the target input box.
    InputChanged(String),
    /// User asked to submit the current input as one batch.
    SubmitClicked,
    /// Engine finished the batch request, successfully or not.
    BatchCompleted {
        submission: SubmissionId,
        result: Result<Vec<BatchEntry>, BatchFailure>,
    },
    /// User clicked Export CSV.
    ExportCsvClicked,
    /// User clicked Copy Table.
    CopyTableClicked,
    /// An export effect finished; `Ok` carries a short confirmation.
    ExportFinished {
        kind: ExportKind,
        result: Result<String, String>,
    },
    /// User clicked Clear.
    ClearClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
