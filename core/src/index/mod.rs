pub mod adapters;
pub mod r#trait;
mod types;

pub use adapters::parse_query_matches;
pub use r#trait::VectorIndex;
pub use types::{IndexEntry, Match};
