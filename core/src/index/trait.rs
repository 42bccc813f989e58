use async_trait::async_trait;

use super::types::{IndexEntry, Match};

/// Client side of an external similarity index.
///
/// Implementations make a single attempt per call and surface failures to the
/// caller; retry and timeout policy belongs to whoever wraps the pipeline.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    fn name(&self) -> &str;
    /// Insert or replace entries by id. Returns how many entries the index accepted.
    async fn upsert(&self, entries: &[IndexEntry]) -> anyhow::Result<usize>;
    /// At most `top_k` matches, highest score first.
    async fn query(&self, vector: &[f32], top_k: usize) -> anyhow::Result<Vec<Match>>;
}
