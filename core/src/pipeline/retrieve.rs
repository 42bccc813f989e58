use std::sync::Arc;

use crate::context::{build_context, build_prompt};
use crate::embed::FeatureEmbedder;
use crate::error::{GaitError, Stage};
use crate::generator::AnswerGenerator;
use crate::index::VectorIndex;
use crate::records::GaitMetrics;

use super::types::{Answer, Retrieval};

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Clone)]
pub struct RetrievalPipeline {
    pub(super) embedder: FeatureEmbedder,
    pub(super) index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl RetrievalPipeline {
    pub fn new(embedder: FeatureEmbedder, index: Arc<dyn VectorIndex>, top_k: usize) -> Self {
        Self {
            embedder,
            index,
            top_k: top_k.max(1),
        }
    }

    pub fn embedder(&self) -> &FeatureEmbedder {
        &self.embedder
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn index_name(&self) -> &str {
        self.index.name()
    }

    /// Matches are passed on in the order the index returned them.
    pub async fn retrieve(&self, metrics: &GaitMetrics) -> Result<Retrieval, GaitError> {
        let query = self.embedder.embed(metrics);
        tracing::debug!(
            target: "gait.pipeline",
            stage = "pipeline.retrieve.in",
            index = %self.index.name(),
            top_k = self.top_k,
            vector = ?query
        );

        let matches = self
            .index
            .query(&query, self.top_k)
            .await
            .map_err(|e| GaitError::service(Stage::Query, format!("{e:#}")))?;

        tracing::debug!(
            target: "gait.pipeline",
            stage = "pipeline.retrieve.out",
            matches = matches.len()
        );

        if matches.is_empty() {
            return Ok(Retrieval::NoResults { query });
        }
        Ok(Retrieval::Matches { query, matches })
    }

    pub async fn answer(
        &self,
        metrics: &GaitMetrics,
        generator: &dyn AnswerGenerator,
    ) -> Result<Answer, GaitError> {
        let (query, matches) = match self.retrieve(metrics).await? {
            Retrieval::NoResults { query } => {
                tracing::info!(
                    target: "gait.pipeline",
                    stage = "pipeline.answer.skip",
                    "no similar results, skipping generation"
                );
                return Ok(Answer::NoResults { query });
            }
            Retrieval::Matches { query, matches } => (query, matches),
        };

        let context = build_context(&matches, self.top_k);
        let prompt = build_prompt(metrics, &context);
        tracing::debug!(
            target: "gait.pipeline",
            stage = "pipeline.generate.in",
            generator = %generator.name(),
            prompt_len = prompt.len()
        );

        let text = generator
            .generate(&prompt)
            .await
            .map_err(|e| GaitError::service(Stage::Generate, format!("{e:#}")))?;

        tracing::debug!(
            target: "gait.pipeline",
            stage = "pipeline.generate.out",
            answer_len = text.len()
        );

        Ok(Answer::Generated {
            metrics: *metrics,
            query,
            matches,
            context,
            prompt,
            text,
        })
    }
}
