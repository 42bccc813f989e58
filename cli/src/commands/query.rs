use std::io::Write;

use gait_core::api::{
    format_vector, Answer, AnswerGenerator, AppConfig, CliError, GaitInputSource, GaitMetrics,
    IndexProvider, RecordStore, Retrieval, RetrievalPipeline,
};

use super::cli::QueryArgs;

pub const NO_RESULTS: &str = "No similar results found.";

/// A memory index starts empty in every process, so load the records into it
/// before querying. Remote indexes are left alone.
pub async fn seed_local_index(
    cfg: &AppConfig,
    pipeline: &RetrievalPipeline,
) -> Result<(), CliError> {
    if !matches!(cfg.index.provider, IndexProvider::Memory) {
        return Ok(());
    }
    let store = RecordStore::load(&cfg.records.path)?;
    let report = pipeline
        .ingest(&store, cfg.retrieval.upsert_batch_size)
        .await?;
    tracing::debug!(
        target: "gait.cli",
        stage = "query.seed",
        index = %report.index,
        upserted = report.upserted
    );
    Ok(())
}

pub async fn run(
    args: &QueryArgs,
    pipeline: &RetrievalPipeline,
    generator: Option<&dyn AnswerGenerator>,
    input: &mut dyn GaitInputSource,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let metrics = input.read_metrics()?;
    match generator {
        Some(generator) if !args.no_generate => answer(pipeline, generator, &metrics, out).await,
        _ => list_only(pipeline, &metrics, out).await,
    }
}

async fn list_only(
    pipeline: &RetrievalPipeline,
    metrics: &GaitMetrics,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let retrieval = pipeline.retrieve(metrics).await?;
    writeln!(
        out,
        "\nQuery vector: {}",
        format_vector(retrieval.query_vector())
    )?;
    match retrieval {
        Retrieval::NoResults { .. } => writeln!(out, "\n{NO_RESULTS}")?,
        Retrieval::Matches { matches, .. } => {
            writeln!(out)?;
            for (i, m) in matches.iter().enumerate() {
                writeln!(out, "{}. {} (similarity score: {:.3})", i + 1, m.id, m.score)?;
            }
        }
    }
    Ok(0)
}

async fn answer(
    pipeline: &RetrievalPipeline,
    generator: &dyn AnswerGenerator,
    metrics: &GaitMetrics,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    match pipeline.answer(metrics, generator).await? {
        Answer::NoResults { query } => {
            writeln!(out, "\nQuery vector: {}", format_vector(&query))?;
            writeln!(out, "\n{NO_RESULTS}")?;
        }
        Answer::Generated {
            query,
            context,
            text,
            ..
        } => {
            writeln!(out, "\nQuery vector: {}", format_vector(&query))?;
            writeln!(out, "\n{context}")?;
            writeln!(out, "{}", text.trim_end())?;
        }
    }
    Ok(0)
}
