use std::sync::{mpsc, Arc};
use std::thread;

use scout_logging::{scout_debug, scout_error};

use crate::{BatchClient, EngineError, EngineEvent, FailureKind, SubmissionId, SubmitError};

enum EngineCommand {
    SubmitBatch {
        submission: SubmissionId,
        targets: Vec<String>,
    },
}

/// Runs batch requests on a background tokio runtime and reports each
/// completion as an [`EngineEvent`] on the supplied channel.
///
/// Every submitted batch produces exactly one `BatchCompleted`, even when the
/// client panics mid-request.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        client: Arc<dyn BatchClient>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(handle_command(client, command, event_tx));
            }
            scout_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, submission: SubmissionId, targets: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitBatch {
            submission,
            targets,
        });
    }
}

async fn handle_command(
    client: Arc<dyn BatchClient>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::SubmitBatch {
            submission,
            targets,
        } => {
            let task = tokio::spawn(async move { client.submit(&targets).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    scout_error!("Batch {} task failed: {}", submission, err);
                    Err(SubmitError::new(
                        FailureKind::Network,
                        format!("batch request aborted: {err}"),
                    ))
                }
            };
            let _ = event_tx.send(EngineEvent::BatchCompleted { submission, result });
        }
    }
}
