use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use medlist::records::RecordKind;
use medlist::render::protocol::{StoreCommand, StoreResponse};
use medlist::store::worker::store_worker_loop;
use medlist::store::{Dataset, JsonFileSource, RecordSource};
use medlist::MedlistError;

const TIMEOUT_MS: u64 = 500;

const CLINIC: &str = r#"{
    "labs": [
        {"id": "lab-1", "name": "Alpha Lab", "contact": "+20 100 111", "created_at": "2024-03-01T10:00:00Z"},
        {"id": "lab-2", "name": "Beta Lab", "address": "Giza", "created_at": "2024-03-02T10:00:00Z"}
    ],
    "medications": [
        {"id": "med-1", "name": "Amoxicillin", "instructions": "twice daily", "created_at": "2024-03-05T08:30:00Z"}
    ],
    "orders": [
        {"id": "order-1", "lab_id": "lab-1", "created_at": "2024-03-06T09:00:00Z"}
    ]
}"#;

async fn next_response(rx: &mut mpsc::Receiver<StoreResponse>) -> StoreResponse {
    timeout(Duration::from_millis(TIMEOUT_MS), rx.recv())
        .await
        .expect("worker response timed out")
        .expect("worker channel closed unexpectedly")
}

async fn spawn_worker(
    contents: &str,
) -> (
    mpsc::Sender<StoreCommand>,
    mpsc::Receiver<StoreResponse>,
    tokio::task::JoinHandle<()>,
    tempfile::TempDir,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (resp_tx, resp_rx) = mpsc::channel(4);

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("clinic.json");
    std::fs::write(&path, contents).expect("write contents");

    let source: Arc<dyn RecordSource> = Arc::new(JsonFileSource::open(&path).expect("open source"));
    let worker = tokio::spawn(store_worker_loop(cmd_rx, resp_tx, source));

    (cmd_tx, resp_rx, worker, dir)
}

fn saved_dataset(dir: &tempfile::TempDir) -> Dataset {
    let raw = std::fs::read_to_string(dir.path().join("clinic.json")).expect("read data file");
    serde_json::from_str(&raw).expect("parse data file")
}

#[tokio::test]
async fn load_returns_every_record() {
    let (cmd_tx, mut resp_rx, worker, _dir) = spawn_worker(CLINIC).await;

    cmd_tx
        .send(StoreCommand::Load { request_id: 1 })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        StoreResponse::Loaded {
            request_id,
            dataset,
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(dataset.labs.len(), 2);
            assert_eq!(dataset.medications[0].name, "Amoxicillin");
            assert_eq!(dataset.orders[0].lab_id, "lab-1");
            assert_eq!(dataset.labs[1].contact, None);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    cmd_tx.send(StoreCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn missing_arrays_default_to_empty() {
    let (cmd_tx, mut resp_rx, worker, _dir) = spawn_worker(r#"{"labs": []}"#).await;

    cmd_tx
        .send(StoreCommand::Load { request_id: 7 })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        StoreResponse::Loaded { dataset, .. } => assert_eq!(dataset, Dataset::default()),
        other => panic!("unexpected response: {other:?}"),
    }

    cmd_tx.send(StoreCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn malformed_file_reports_error() {
    let (cmd_tx, mut resp_rx, worker, _dir) = spawn_worker("{ not json").await;

    cmd_tx
        .send(StoreCommand::Load { request_id: 3 })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        StoreResponse::Error { request_id, error } => {
            assert_eq!(request_id, 3);
            assert!(matches!(error, MedlistError::DataFormat { .. }));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    cmd_tx.send(StoreCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn delete_persists_the_data_file() {
    let (cmd_tx, mut resp_rx, worker, dir) = spawn_worker(CLINIC).await;

    cmd_tx
        .send(StoreCommand::Delete {
            request_id: 9,
            kind: RecordKind::Medication,
            id: "med-1".to_string(),
        })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        StoreResponse::Deleted {
            request_id,
            kind,
            name,
            dataset,
        } => {
            assert_eq!(request_id, 9);
            assert_eq!(kind, RecordKind::Medication);
            assert_eq!(name, "Amoxicillin");
            assert!(dataset.medications.is_empty());
        }
        other => panic!("unexpected response: {other:?}"),
    }

    let saved = saved_dataset(&dir);
    assert!(saved.medications.is_empty());
    assert_eq!(saved.labs.len(), 2);

    cmd_tx.send(StoreCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn deleting_unknown_record_leaves_file_untouched() {
    let (cmd_tx, mut resp_rx, worker, dir) = spawn_worker(CLINIC).await;

    cmd_tx
        .send(StoreCommand::Load { request_id: 1 })
        .await
        .unwrap();
    next_response(&mut resp_rx).await;

    cmd_tx
        .send(StoreCommand::Delete {
            request_id: 2,
            kind: RecordKind::Lab,
            id: "lab-404".to_string(),
        })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        StoreResponse::Error { request_id, error } => {
            assert_eq!(request_id, 2);
            assert!(matches!(error, MedlistError::RecordNotFound { .. }));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    assert_eq!(saved_dataset(&dir).labs.len(), 2);

    cmd_tx.send(StoreCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn dropping_the_sender_stops_the_worker() {
    let (cmd_tx, _resp_rx, worker, _dir) = spawn_worker(CLINIC).await;
    drop(cmd_tx);
    timeout(Duration::from_millis(TIMEOUT_MS), worker)
        .await
        .expect("worker did not stop")
        .unwrap();
}
