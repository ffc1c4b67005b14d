//! Scout core: pure batch controller state machine, view model, and table export.
mod effect;
mod msg;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::{Effect, ExportKind};
pub use msg::Msg;
pub use state::{parse_targets, BatchEntry, BatchFailure, ControllerPhase, ControllerState, SubmissionId};
pub use table::{
    render_rows, to_clipboard_table, to_csv, RowStatus, TableRow, CSV_HEADER, NO_DATA_METRIC,
    SUCCESS_LABEL, TSV_HEADER,
};
pub use update::update;
pub use view_model::BatchViewModel;
