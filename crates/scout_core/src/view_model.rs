use crate::{ControllerPhase, TableRow};

/// Everything a front end needs to draw the batch screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchViewModel {
    pub phase: ControllerPhase,
    pub input: String,
    /// Number of targets in the in-flight batch, zero when idle.
    pub pending_count: usize,
    pub rows: Vec<TableRow>,
    pub results_visible: bool,
    pub submit_enabled: bool,
    pub clear_visible: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub dirty: bool,
}

impl BatchViewModel {
    pub fn loading_text(&self) -> Option<String> {
        match self.phase {
            ControllerPhase::Submitting => Some(format!(
                "Processing {} LinkedIn URLs...",
                self.pending_count
            )),
            _ => None,
        }
    }
}
