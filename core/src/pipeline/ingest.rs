use crate::error::{GaitError, Stage};
use crate::index::IndexEntry;
use crate::records::RecordStore;

use super::retrieve::RetrievalPipeline;
use super::types::IngestReport;

impl RetrievalPipeline {
    /// Embed every record and upsert them in file order, `batch_size` at a time.
    ///
    /// The first failing batch aborts the run. Batches already sent stay in the
    /// index; re-running is safe because upsert replaces by id.
    pub async fn ingest(
        &self,
        store: &RecordStore,
        batch_size: usize,
    ) -> Result<IngestReport, GaitError> {
        let prepared: Vec<_> = store
            .get_all()
            .iter()
            .map(|r| (r.name.clone(), self.embedder.embed_runner(r)))
            .collect();
        let entries: Vec<IndexEntry> = prepared
            .iter()
            .map(|(name, v)| IndexEntry::new(name.clone(), v.to_vec()))
            .collect();

        let mut upserted = 0usize;
        for chunk in entries.chunks(batch_size.max(1)) {
            let n = self.index.upsert(chunk).await.map_err(|e| {
                GaitError::service(
                    Stage::Upsert,
                    format!(
                        "batch starting at '{}' rejected after {upserted} upserted: {e:#}",
                        chunk[0].id
                    ),
                )
            })?;
            upserted += n;
            tracing::debug!(
                target: "gait.pipeline",
                stage = "pipeline.ingest.batch",
                batch = chunk.len(),
                upserted = upserted
            );
        }

        tracing::info!(
            target: "gait.pipeline",
            stage = "pipeline.ingest.out",
            index = %self.index.name(),
            records = prepared.len(),
            upserted = upserted
        );

        Ok(IngestReport {
            index: self.index.name().to_string(),
            prepared,
            upserted,
        })
    }
}
