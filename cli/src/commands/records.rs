use std::io::Write;

use gait_core::api::{
    format_vector, AppConfig, CliError, FeatureEmbedder, RecordStore, RunnerRecord,
};

use super::cli::{EmbedArgs, RecordsArgs, RecordsCommand};

fn load(cfg: &AppConfig, records: Option<String>) -> Result<RecordStore, CliError> {
    let path = records.unwrap_or_else(|| cfg.records.path.clone());
    Ok(RecordStore::load(path)?)
}

fn write_record(out: &mut dyn Write, r: &RunnerRecord) -> std::io::Result<()> {
    writeln!(out, "{}", r.name)?;
    writeln!(out, "  cadence: {} steps/min", r.cadence)?;
    writeln!(out, "  heel strike ratio: {}", r.heel_strike)?;
    writeln!(out, "  vertical oscillation: {} cm", r.vertical_oscillation)
}

pub fn run(cfg: &AppConfig, args: RecordsArgs, out: &mut dyn Write) -> Result<i32, CliError> {
    let store = load(cfg, args.records)?;
    match args.command {
        RecordsCommand::List => {
            for name in store.names() {
                writeln!(out, "{name}")?;
            }
        }
        RecordsCommand::Show { name } => {
            let r = store.require(&name)?;
            write_record(out, r)?;
        }
    }
    Ok(0)
}

pub fn embed(cfg: &AppConfig, args: EmbedArgs, out: &mut dyn Write) -> Result<i32, CliError> {
    let store = load(cfg, args.records)?;
    let r = store.require(&args.name)?;
    let embedder = FeatureEmbedder::new(cfg.retrieval.heel_strike);
    let raw = embedder.raw_features(&r.metrics());
    writeln!(out, "{}", r.name)?;
    writeln!(
        out,
        "  features: [{:.3}, {:.3}, {:.3}]",
        raw[0], raw[1], raw[2]
    )?;
    writeln!(out, "  unit vector: {}", format_vector(&embedder.embed_runner(r)))?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.records.path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/runners.json").to_string();
        cfg
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<i32, CliError>) -> String {
        let mut out = Vec::new();
        assert_eq!(f(&mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_prints_names_in_file_order() {
        let text = render(|out| {
            run(
                &cfg(),
                RecordsArgs {
                    records: None,
                    command: RecordsCommand::List,
                },
                out,
            )
        });
        assert!(text.starts_with("Deer\nCheetah\n"));
    }

    #[test]
    fn show_is_case_insensitive() {
        let text = render(|out| {
            run(
                &cfg(),
                RecordsArgs {
                    records: None,
                    command: RecordsCommand::Show {
                        name: "deer".to_string(),
                    },
                },
                out,
            )
        });
        assert!(text.starts_with("Deer\n"));
        assert!(text.contains("cadence: 200 steps/min"));
    }

    #[test]
    fn show_unknown_runner_fails() {
        let mut out = Vec::new();
        let err = run(
            &cfg(),
            RecordsArgs {
                records: None,
                command: RecordsCommand::Show {
                    name: "Unicorn".to_string(),
                },
            },
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Gait(gait_core::api::GaitError::RecordNotFound(_))
        ));
    }

    #[test]
    fn embed_prints_raw_and_unit_vector() {
        let text = render(|out| {
            embed(
                &cfg(),
                EmbedArgs {
                    name: "Deer".to_string(),
                    records: None,
                },
                out,
            )
        });
        assert!(text.contains("features: [0.750, 0.000, 0.143]"));
        assert!(text.contains("unit vector: [0.982, 0.000, 0.187]"));
    }
}
