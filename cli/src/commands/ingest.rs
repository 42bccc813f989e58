use std::io::Write;

use gait_core::api::{format_vector, AppConfig, CliError, RecordStore, RetrievalPipeline};

use super::cli::IngestArgs;

pub async fn run(
    cfg: &AppConfig,
    args: IngestArgs,
    pipeline: &RetrievalPipeline,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let path = args.records.unwrap_or_else(|| cfg.records.path.clone());
    let store = RecordStore::load(&path)?;
    ingest_store(&store, pipeline, cfg.retrieval.upsert_batch_size, out).await
}

pub async fn ingest_store(
    store: &RecordStore,
    pipeline: &RetrievalPipeline,
    batch_size: usize,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let report = pipeline.ingest(store, batch_size).await?;
    for (name, v) in &report.prepared {
        writeln!(out, "Prepared: {name} → {}", format_vector(v))?;
    }
    writeln!(
        out,
        "\nUploaded {} vectors to index '{}'",
        report.upserted, report.index
    )?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gait_core::api::{FeatureEmbedder, RunnerRecord};
    use gait_plugins::index::InMemoryIndex;
    use std::sync::Arc;

    #[tokio::test]
    async fn prints_prepared_vectors_and_total() {
        let index = Arc::new(InMemoryIndex::new("runners-index"));
        let pipeline = RetrievalPipeline::new(FeatureEmbedder::default(), index.clone(), 5);
        let store = RecordStore::from_records(vec![RunnerRecord {
            name: "Deer".to_string(),
            cadence: 200.0,
            heel_strike: 0.0,
            vertical_oscillation: 8.0,
        }]);

        let mut out = Vec::new();
        ingest_store(&store, &pipeline, 100, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Prepared: Deer → [0.982, 0.000, 0.187]"));
        assert!(text.ends_with("Uploaded 1 vectors to index 'runners-index'\n"));
        assert_eq!(index.len(), 1);
    }
}
