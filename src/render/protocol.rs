//! Protocol definitions shared between the render coordinator and the store worker.

use crate::error::MedlistError;
use crate::records::RecordKind;
use crate::store::Dataset;

/// Identifier attached to worker requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the store worker.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// (Re)read the data file
    Load { request_id: RequestId },
    /// Remove a record and persist the data file
    Delete {
        request_id: RequestId,
        kind: RecordKind,
        id: String,
    },
    Shutdown,
}

/// Responses emitted by the store worker back to the coordinator.
#[derive(Debug)]
pub enum StoreResponse {
    Loaded {
        request_id: RequestId,
        dataset: Dataset,
    },
    Deleted {
        request_id: RequestId,
        kind: RecordKind,
        name: String,
        dataset: Dataset,
    },
    Error {
        request_id: RequestId,
        error: MedlistError,
    },
}

impl StoreResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            StoreResponse::Loaded { request_id, .. }
            | StoreResponse::Deleted { request_id, .. }
            | StoreResponse::Error { request_id, .. } => *request_id,
        }
    }
}
