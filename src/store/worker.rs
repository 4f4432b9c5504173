use crate::error::{MedlistError, Result};
use crate::records::RecordKind;
use crate::render::protocol::{RequestId, StoreCommand, StoreResponse};
use crate::store::{Dataset, RecordSource};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the store worker, processing commands from the coordinator until shutdown.
pub async fn store_worker_loop(
    mut rx: Receiver<StoreCommand>,
    tx: Sender<StoreResponse>,
    source: Arc<dyn RecordSource>,
) {
    let mut state = WorkerState::new(source);

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct WorkerState {
    source: Arc<dyn RecordSource>,
    /// Last dataset read from or written to the source
    dataset: Option<Dataset>,
}

impl WorkerState {
    fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    async fn handle_command(&mut self, cmd: StoreCommand) -> HandlerOutcome {
        match cmd {
            StoreCommand::Load { request_id } => match self.source.load().await {
                Ok(dataset) => {
                    self.dataset = Some(dataset.clone());
                    HandlerOutcome::respond(StoreResponse::Loaded {
                        request_id,
                        dataset,
                    })
                }
                Err(error) => HandlerOutcome::respond(StoreResponse::Error { request_id, error }),
            },
            StoreCommand::Delete {
                request_id,
                kind,
                id,
            } => match self.delete(request_id, kind, &id).await {
                Ok(response) => HandlerOutcome::respond(response),
                Err(error) => HandlerOutcome::respond(StoreResponse::Error { request_id, error }),
            },
            StoreCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    async fn delete(
        &mut self,
        request_id: RequestId,
        kind: RecordKind,
        id: &str,
    ) -> Result<StoreResponse> {
        let mut dataset = match self.dataset.take() {
            Some(dataset) => dataset,
            None => self.source.load().await?,
        };

        let removed = match kind {
            RecordKind::Lab => dataset.remove_lab(id).map(|lab| lab.name),
            RecordKind::Medication => dataset.remove_medication(id).map(|med| med.name),
        };

        let name = match removed {
            Ok(name) => name,
            Err(err) => {
                self.dataset = Some(dataset);
                return Err(err);
            }
        };

        if let Err(err) = self.source.save(&dataset).await {
            // Keep the on-disk view; the in-memory copy is reloaded next time
            self.dataset = None;
            return Err(MedlistError::store(format!("failed to save after delete: {err}")));
        }

        log::debug!("deleted {kind:?} {id} from {}", self.source.location().display());
        self.dataset = Some(dataset.clone());
        Ok(StoreResponse::Deleted {
            request_id,
            kind,
            name,
            dataset,
        })
    }
}

struct HandlerOutcome {
    response: Option<StoreResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: StoreResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
