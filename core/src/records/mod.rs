mod store;
mod types;

pub use store::RecordStore;
pub use types::{GaitMetrics, RunnerRecord};
