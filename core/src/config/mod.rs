mod load;
mod types;

pub use load::{get_gait_data_dir, load_default, load_from_path};
pub use types::{
    AppConfig, GeminiConfig, GeneratorBackend, GeneratorConfig, IndexConfig, IndexProvider,
    LoggingConfig, OpenAiConfig, PineconeConfig, RecordsConfig, RetrievalConfig,
};
