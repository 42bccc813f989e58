//! Process-local index for offline runs and tests. Brute-force cosine scan.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gait_core::api as core_api;

pub struct InMemoryIndex {
    name: String,
    entries: Mutex<BTreeMap<String, Vec<f32>>>,
}

impl InMemoryIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<Vec<f32>> {
        self.entries.lock().ok()?.get(id).cloned()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

#[async_trait]
impl core_api::VectorIndex for InMemoryIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, batch: &[core_api::IndexEntry]) -> Result<usize> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("in-memory index lock poisoned"))?;
        for e in batch {
            entries.insert(e.id.clone(), e.values.clone());
        }
        tracing::debug!(
            target: "gait.index",
            stage = "index.memory.upsert.out",
            upserted = batch.len(),
            total = entries.len()
        );
        Ok(batch.len())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<core_api::Match>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("in-memory index lock poisoned"))?;
        let mut out: Vec<core_api::Match> = entries
            .iter()
            .map(|(id, values)| core_api::Match {
                id: id.clone(),
                score: cosine(vector, values),
                values: Some(values.clone()),
            })
            .collect();
        // BTreeMap iteration is id-ordered and the sort is stable, so ties stay by id.
        out.sort_by(|a, b| b.score.total_cmp(&a.score));
        out.truncate(top_k);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gait_core::api::{FeatureEmbedder, IndexEntry, RunnerRecord, VectorIndex};

    #[tokio::test]
    async fn upsert_is_idempotent_by_id() {
        let idx = InMemoryIndex::new("runners-index");
        let e = IndexEntry::new("Deer", vec![0.98, 0.0, 0.19]);
        idx.upsert(&[e.clone()]).await.unwrap();
        idx.upsert(&[e]).await.unwrap();
        assert_eq!(idx.len(), 1);
    }

    #[tokio::test]
    async fn re_upsert_replaces_vector() {
        let idx = InMemoryIndex::new("runners-index");
        idx.upsert(&[IndexEntry::new("Deer", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();
        idx.upsert(&[IndexEntry::new("Deer", vec![0.0, 1.0, 0.0])])
            .await
            .unwrap();
        assert_eq!(idx.get("Deer"), Some(vec![0.0, 1.0, 0.0]));
    }

    #[tokio::test]
    async fn query_ranks_by_similarity() {
        let idx = InMemoryIndex::new("runners-index");
        let embedder = FeatureEmbedder::default();
        let records = [
            ("Deer", 200.0, 0.0, 8.0),
            ("Walker", 100.0, 1.0, 6.5),
            ("Jogger", 165.0, 0.7, 10.0),
        ];
        let entries: Vec<IndexEntry> = records
            .iter()
            .map(|(name, c, h, v)| {
                let r = RunnerRecord {
                    name: name.to_string(),
                    cadence: *c,
                    heel_strike: *h,
                    vertical_oscillation: *v,
                };
                IndexEntry::new(*name, embedder.embed_runner(&r).to_vec())
            })
            .collect();
        idx.upsert(&entries).await.unwrap();

        let q = entries[0].values.clone();
        let matches = idx.query(&q, 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "Deer");
        assert!((matches[0].score - 1.0).abs() < 1e-5);
        assert!(matches[0].score >= matches[1].score);
    }

    #[tokio::test]
    async fn empty_index_returns_no_matches() {
        let idx = InMemoryIndex::new("runners-index");
        assert!(idx.query(&[1.0, 0.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }
}
