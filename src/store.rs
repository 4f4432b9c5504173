//! Record storage: the JSON data file and the in-memory store the views read from.
//!
//! The views never own records. They read them from [`RecordStore`], which the render
//! loop refreshes from responses of the background store worker.

pub mod worker;

use crate::error::{MedlistError, Result};
use crate::records::{Lab, Medication, Order};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything in one data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub labs: Vec<Lab>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Dataset {
    pub fn remove_lab(&mut self, id: &str) -> Result<Lab> {
        let index = self
            .labs
            .iter()
            .position(|lab| lab.id == id)
            .ok_or_else(|| MedlistError::RecordNotFound { id: id.to_string() })?;
        Ok(self.labs.remove(index))
    }

    pub fn remove_medication(&mut self, id: &str) -> Result<Medication> {
        let index = self
            .medications
            .iter()
            .position(|med| med.id == id)
            .ok_or_else(|| MedlistError::RecordNotFound { id: id.to_string() })?;
        Ok(self.medications.remove(index))
    }
}

/// Where datasets are loaded from and written back to
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<Dataset>;

    async fn save(&self, dataset: &Dataset) -> Result<()>;

    fn location(&self) -> &Path;
}

/// Dataset stored as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Validate the path and create a source for it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MedlistError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(MedlistError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            MedlistError::file_error(format!("cannot read {}", self.path.display()), err)
        })?;
        let dataset: Dataset = serde_json::from_slice(&bytes)?;
        log::debug!(
            "loaded {} labs, {} medications, {} orders from {}",
            dataset.labs.len(),
            dataset.medications.len(),
            dataset.orders.len(),
            self.path.display()
        );
        Ok(dataset)
    }

    async fn save(&self, dataset: &Dataset) -> Result<()> {
        let json = serde_json::to_vec_pretty(dataset)?;
        let path = self.path.clone();

        // Write next to the target and rename over it so a crash never truncates the file
        tokio::task::spawn_blocking(move || -> Result<()> {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
            tmp.write_all(&json)?;
            tmp.flush()?;
            tmp.persist(&path).map_err(|err| {
                MedlistError::file_error(format!("cannot replace {}", path.display()), err.error)
            })?;
            Ok(())
        })
        .await
        .map_err(|err| MedlistError::store(format!("save task failed: {err}")))?
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Records as seen by the views, plus the loading flag
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    dataset: Dataset,
    loading: bool,
}

impl RecordStore {
    /// Empty store waiting for its first load
    pub fn pending() -> Self {
        Self {
            dataset: Dataset::default(),
            loading: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Leave the loading state without new data (load failed)
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn replace(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.loading = false;
    }

    pub fn labs(&self) -> &[Lab] {
        &self.dataset.labs
    }

    pub fn medications(&self) -> &[Medication] {
        &self.dataset.medications
    }

    pub fn orders(&self) -> &[Order] {
        &self.dataset.orders
    }
}
