use std::io::Write;

use clap::Parser;
use gait_cli::commands::{cli, ingest, query, records};
use gait_cli::input::PromptInput;
use gait_core::api::{AppConfig, CliError, GaitError, LoggingConfig};
use gait_plugins::factory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => gait_core::config::load_from_path(path),
        None => gait_core::config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;
    tracing::debug!(
        target: "gait.cli",
        stage = "cli.start",
        records = %cfg.records.path,
        top_k = cfg.retrieval.top_k,
        heel_strike = ?cfg.retrieval.heel_strike
    );

    dispatch(args.command, &cfg).await
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success (including "no similar results")
    // 11: config error
    // 12: records file missing/malformed or unknown runner
    // 13: bad interactive input
    // 20: local IO error
    // 30: index or generator service failure
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Gait(ge) => match ge {
            GaitError::Config(_) => 11,
            GaitError::RecordsNotFound { .. }
            | GaitError::RecordsParse { .. }
            | GaitError::RecordNotFound(_) => 12,
            GaitError::Input(_) => 13,
            GaitError::Service { .. } => 30,
        },
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, cfg: &AppConfig) -> Result<i32, CliError> {
    let mut out = std::io::stdout();
    match cmd {
        cli::Commands::Ingest(ingest_args) => {
            let pipeline = factory::build_pipeline(cfg)
                .await
                .map_err(|e| CliError::Config(format!("{e:#}")))?;
            ingest::run(cfg, ingest_args, &pipeline, &mut out).await
        }
        cli::Commands::Query(query_args) => {
            let mut cfg = cfg.clone();
            if let Some(k) = query_args.top_k {
                cfg.retrieval.top_k = k;
            }
            let pipeline = factory::build_pipeline(&cfg)
                .await
                .map_err(|e| CliError::Config(format!("{e:#}")))?;
            query::seed_local_index(&cfg, &pipeline).await?;
            // Backend is chosen once, before any query is made.
            let generator = if query_args.no_generate {
                None
            } else {
                Some(
                    factory::build_generator(&cfg.generator)
                        .map_err(|e| CliError::Config(format!("{e:#}")))?,
                )
            };

            print_banner(&mut out)?;
            let mut input = PromptInput::new(std::io::stdin().lock(), std::io::stdout())
                .with_preset(
                    query_args.cadence,
                    query_args.heel_strike,
                    query_args.vertical_oscillation,
                );
            query::run(
                &query_args,
                &pipeline,
                generator.as_deref(),
                &mut input,
                &mut out,
            )
            .await
        }
        cli::Commands::Records(records_args) => records::run(cfg, records_args, &mut out),
        cli::Commands::Embed(embed_args) => records::embed(cfg, embed_args, &mut out),
    }
}

fn print_banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\nDescribe a gait you'd like to compare:")
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("gait-cli"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("gait-cli.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
