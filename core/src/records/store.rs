use std::path::Path;

use crate::error::GaitError;

use super::types::RunnerRecord;

/// Read-only collection of runner records, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<RunnerRecord>,
}

impl RecordStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GaitError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        if !path.exists() {
            return Err(GaitError::RecordsNotFound { path: path_str });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| GaitError::RecordsParse {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        let records = serde_json::from_str::<Vec<RunnerRecord>>(&raw).map_err(|e| {
            GaitError::RecordsParse {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(
            target: "gait.records",
            stage = "records.load.out",
            path = %path_str,
            records = records.len()
        );
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<RunnerRecord>) -> Self {
        Self { records }
    }

    pub fn get_all(&self) -> &[RunnerRecord] {
        &self.records
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Case-insensitive exact match on `name`; the first hit in file order wins.
    pub fn get_by_name(&self, name: &str) -> Option<&RunnerRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
    }

    pub fn require(&self, name: &str) -> Result<&RunnerRecord, GaitError> {
        self.get_by_name(name)
            .ok_or_else(|| GaitError::RecordNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
