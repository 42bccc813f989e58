mod ingest;
mod retrieve;
mod types;

pub use retrieve::{RetrievalPipeline, DEFAULT_TOP_K};
pub use types::{Answer, IngestReport, Retrieval};
