pub mod cli;
pub mod ingest;
pub mod query;
pub mod records;
