use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gait", version, about = "Compare running gaits by similarity")]
pub struct Args {
    /// Config file to use instead of ~/.gait-rag/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IngestArgs {
    /// Records file; overrides `records.path`.
    #[arg(long)]
    pub records: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Steps per minute. Prompted for when omitted.
    #[arg(long)]
    pub cadence: Option<f64>,

    /// 0 = toe-first, 1 = heel-first. Prompted for when omitted.
    #[arg(long)]
    pub heel_strike: Option<f64>,

    /// Centimetres. Prompted for when omitted.
    #[arg(long)]
    pub vertical_oscillation: Option<f64>,

    #[arg(long)]
    pub top_k: Option<usize>,

    /// Only list the neighbours; do not call the text generator.
    #[arg(long)]
    pub no_generate: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RecordsArgs {
    #[arg(long)]
    pub records: Option<String>,

    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecordsCommand {
    /// Print every runner name in file order.
    List,
    /// Print one runner (case-insensitive name).
    Show { name: String },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EmbedArgs {
    /// Runner name (case-insensitive).
    pub name: String,

    #[arg(long)]
    pub records: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed every record and upsert it into the index.
    Ingest(IngestArgs),
    /// Find the most similar gaits and explain them.
    Query(QueryArgs),
    Records(RecordsArgs),
    /// Show the feature vector of one runner.
    Embed(EmbedArgs),
}
