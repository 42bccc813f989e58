//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `gait_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, GeminiConfig, GeneratorBackend, GeneratorConfig,
    IndexConfig, IndexProvider, LoggingConfig, OpenAiConfig, PineconeConfig, RecordsConfig,
    RetrievalConfig,
};
pub use crate::context::{build_context, build_prompt, SYSTEM_PROMPT};
pub use crate::embed::{
    format_vector, normalize_feature, normalize_vector, FeatureEmbedder, GaitVector,
    HeelStrikeScale,
};
pub use crate::error::{CliError, GaitError, Stage};
pub use crate::generator::AnswerGenerator;
pub use crate::index::{parse_query_matches, IndexEntry, Match, VectorIndex};
pub use crate::input::{check_metric, parse_metric, FixedInput, GaitInputSource};
pub use crate::pipeline::{Answer, IngestReport, Retrieval, RetrievalPipeline, DEFAULT_TOP_K};
pub use crate::records::{GaitMetrics, RecordStore, RunnerRecord};
