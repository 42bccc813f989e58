use std::sync::Arc;

use anyhow::{bail, Result};

use gait_core::api::{
    AnswerGenerator, AppConfig, FeatureEmbedder, GeneratorBackend, GeneratorConfig, IndexConfig,
    IndexProvider, RetrievalPipeline, VectorIndex,
};

use crate::generator::{GeminiGenerator, OpenAiGenerator};
use crate::index::{InMemoryIndex, PineconeIndex};

pub async fn build_index(cfg: &IndexConfig) -> Result<Arc<dyn VectorIndex>> {
    match &cfg.provider {
        IndexProvider::Pinecone(pc_cfg) => Ok(Arc::new(PineconeIndex::connect(pc_cfg).await?)),
        IndexProvider::Memory => Ok(Arc::new(InMemoryIndex::new("memory"))),
    }
}

/// Picks the generation backend once, at startup.
///
/// `auto` prefers OpenAI when its key is present and falls back to Gemini.
pub fn build_generator(cfg: &GeneratorConfig) -> Result<Box<dyn AnswerGenerator>> {
    let has_openai = !cfg.openai.api_key.trim().is_empty();
    let has_gemini = !cfg.gemini.api_key.trim().is_empty();

    tracing::debug!(
        target: "gait.generator",
        stage = "factory.generator",
        backend = ?cfg.backend,
        has_openai = has_openai,
        has_gemini = has_gemini
    );

    match (cfg.backend, has_openai, has_gemini) {
        (GeneratorBackend::Openai | GeneratorBackend::Auto, true, _) => {
            Ok(Box::new(OpenAiGenerator::new(&cfg.openai, cfg.timeout_ms)?))
        }
        (GeneratorBackend::Gemini, _, true) | (GeneratorBackend::Auto, false, true) => {
            Ok(Box::new(GeminiGenerator::new(&cfg.gemini, cfg.timeout_ms)?))
        }
        (GeneratorBackend::Openai, false, _) => {
            bail!("generator backend 'openai' selected but OPENAI_API_KEY is not set")
        }
        (GeneratorBackend::Gemini, _, false) => {
            bail!("generator backend 'gemini' selected but GEMINI_API_KEY is not set")
        }
        (GeneratorBackend::Auto, false, false) => {
            bail!("no generator credentials: set OPENAI_API_KEY or GEMINI_API_KEY")
        }
    }
}

pub async fn build_pipeline(cfg: &AppConfig) -> Result<RetrievalPipeline> {
    let index = build_index(&cfg.index).await?;
    Ok(RetrievalPipeline::new(
        FeatureEmbedder::new(cfg.retrieval.heel_strike),
        index,
        cfg.retrieval.top_k,
    ))
}
