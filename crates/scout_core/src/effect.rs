use crate::SubmissionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one batch request carrying every target, in order.
    SubmitBatch {
        submission: SubmissionId,
        targets: Vec<String>,
    },
    /// Persist the rendered CSV document holding `rows` data rows.
    WriteCsv { contents: String, rows: usize },
    /// Place the tab-separated table on the clipboard.
    CopyToClipboard { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Clipboard,
}
