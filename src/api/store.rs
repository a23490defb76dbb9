//! In-memory prediction history
//!
//! Newest records come first. The store is bounded; inserting past the
//! capacity drops the oldest record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::classification::ClassificationResult;

/// A stored classification with server metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Original upload file name, empty if the client sent none
    pub image_name: String,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

#[derive(Debug, Clone)]
pub struct PredictionStore {
    records: Arc<RwLock<Vec<PredictionRecord>>>,
    capacity: usize,
}

impl PredictionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            capacity,
        }
    }

    /// Store a result and return the created record
    pub async fn insert(&self, result: ClassificationResult, image_name: &str) -> PredictionRecord {
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            image_name: image_name.to_string(),
            result,
        };

        let mut records = self.records.write().await;
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        record
    }

    /// All records, newest first
    pub async fn list(&self) -> Vec<PredictionRecord> {
        self.records.read().await.clone()
    }

    /// Remove a record; returns false if it did not exist
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
