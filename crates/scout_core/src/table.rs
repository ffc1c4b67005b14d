use crate::BatchEntry;

/// Metric value the server reports when a page carried no figure.
pub const NO_DATA_METRIC: &str = "NA";
/// Status text for rows without an error.
pub const SUCCESS_LABEL: &str = "Success";

pub const CSV_HEADER: &str = "LinkedIn URL,Employee Count,Status";
pub const TSV_HEADER: &str = "LinkedIn URL\tEmployee Count\tStatus";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    NoData,
    Error(String),
}

impl RowStatus {
    pub fn classify(entry: &BatchEntry) -> Self {
        match &entry.error {
            Some(message) => RowStatus::Error(message.clone()),
            None if entry.metric == NO_DATA_METRIC => RowStatus::NoData,
            None => RowStatus::Success,
        }
    }

    /// Status column text. `NoData` rows still read as a success; only the
    /// metric column shows the placeholder.
    pub fn label(&self) -> &str {
        match self {
            RowStatus::Success | RowStatus::NoData => SUCCESS_LABEL,
            RowStatus::Error(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub target: String,
    pub metric: String,
    pub status: RowStatus,
}

impl TableRow {
    pub fn status_label(&self) -> &str {
        self.status.label()
    }
}

/// One row per entry, same order. Screen rendering and both exports read these rows.
pub fn render_rows(results: &[BatchEntry]) -> Vec<TableRow> {
    results
        .iter()
        .map(|entry| TableRow {
            target: entry.target.clone(),
            metric: entry.metric.clone(),
            status: RowStatus::classify(entry),
        })
        .collect()
}

/// CSV document: fixed header, every field double-quoted, embedded quotes doubled.
pub fn to_csv(results: &[BatchEntry]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + results.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in render_rows(results) {
        out.push_str(&format!(
            "{},{},{}\n",
            quote(&row.target),
            quote(&row.metric),
            quote(row.status_label())
        ));
    }
    out
}

/// Tab-separated table for pasting into spreadsheets; no quoting.
pub fn to_clipboard_table(results: &[BatchEntry]) -> String {
    let mut out = String::with_capacity(TSV_HEADER.len() + 1 + results.len() * 64);
    out.push_str(TSV_HEADER);
    out.push('\n');
    for row in render_rows(results) {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            row.target,
            row.metric,
            row.status_label()
        ));
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
