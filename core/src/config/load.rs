use std::path::{Path, PathBuf};

use super::types::{AppConfig, IndexProvider};

/// Get the default data directory: ~/.gait-rag
pub fn get_gait_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".gait-rag"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.gait-rag/config.toml
    let user_config = get_gait_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg = if user_config.exists() {
        read_config(&user_config)?
    } else if local_config.exists() {
        read_config(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(finish(cfg, |key| std::env::var(key).ok()))
}

pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let cfg = read_config(path.as_ref())?;
    Ok(finish(cfg, |key| std::env::var(key).ok()))
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
    toml::from_str::<AppConfig>(&s).map_err(|e| anyhow::anyhow!("parse {}: {e}", path.display()))
}

fn finish(mut cfg: AppConfig, env: impl Fn(&str) -> Option<String>) -> AppConfig {
    apply_env_overrides(&mut cfg, env);
    cfg.records.path = shellexpand::tilde(&cfg.records.path).into_owned();
    cfg
}

/// Environment variables win over file values when set and non-blank.
fn apply_env_overrides(cfg: &mut AppConfig, env: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("GAIT_RECORDS_PATH") {
        cfg.records.path = v;
    }

    if let IndexProvider::Pinecone(ref mut pc) = cfg.index.provider {
        if let Some(v) = get("PINECONE_API_KEY") {
            pc.api_key = v;
        }
        if let Some(v) = get("PINECONE_INDEX") {
            pc.index_name = v;
        }
        if let Some(v) = get("PINECONE_HOST") {
            pc.host = v;
        }
    }

    if let Some(v) = get("OPENAI_API_KEY") {
        cfg.generator.openai.api_key = v;
    }
    if let Some(v) = get("GEMINI_API_KEY") {
        cfg.generator.gemini.api_key = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env_of(&[
                ("PINECONE_API_KEY", "pc-key"),
                ("PINECONE_INDEX", "gaits"),
                ("OPENAI_API_KEY", "sk-test"),
                ("GEMINI_API_KEY", "   "),
            ]),
        );
        let IndexProvider::Pinecone(pc) = &cfg.index.provider else {
            panic!("expected pinecone");
        };
        assert_eq!(pc.api_key, "pc-key");
        assert_eq!(pc.index_name, "gaits");
        assert_eq!(cfg.generator.openai.api_key, "sk-test");
        assert_eq!(cfg.generator.gemini.api_key, "");
    }

    #[test]
    fn load_from_path_reads_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[records]\npath = \"/tmp/runners.json\"\n\n[retrieval]\ntop_k = 2").unwrap();
        let cfg = read_config(f.path()).unwrap();
        let cfg = finish(cfg, env_of(&[]));
        assert_eq!(cfg.records.path, "/tmp/runners.json");
        assert_eq!(cfg.retrieval.top_k, 2);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[retrieval\ntop_k = ").unwrap();
        let err = read_config(f.path()).unwrap_err().to_string();
        assert!(err.starts_with("parse "));
    }
}
