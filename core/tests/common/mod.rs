use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use gait_core::api::{AnswerGenerator, IndexEntry, Match, RunnerRecord, VectorIndex};

/// Index double: records upserts, answers queries from a canned list.
#[derive(Default)]
pub struct FakeIndex {
    pub upserts: Mutex<Vec<Vec<IndexEntry>>>,
    pub queries: AtomicUsize,
    pub canned: Vec<Match>,
    pub fail_query: bool,
    /// Fail the upsert call with this zero-based index.
    pub fail_upsert_at: Option<usize>,
}

impl FakeIndex {
    pub fn with_matches(canned: Vec<Match>) -> Self {
        Self {
            canned,
            ..Self::default()
        }
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    fn name(&self) -> &str {
        "fake-index"
    }

    async fn upsert(&self, entries: &[IndexEntry]) -> anyhow::Result<usize> {
        let mut calls = self.upserts.lock().unwrap();
        if self.fail_upsert_at == Some(calls.len()) {
            anyhow::bail!("status=503 service unavailable");
        }
        calls.push(entries.to_vec());
        Ok(entries.len())
    }

    async fn query(&self, _vector: &[f32], top_k: usize) -> anyhow::Result<Vec<Match>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_query {
            anyhow::bail!("connect refused");
        }
        Ok(self.canned.iter().take(top_k).cloned().collect())
    }
}

#[derive(Default)]
pub struct FakeGenerator {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl FakeGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake-generator"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            anyhow::bail!("quota exceeded");
        }
        Ok("A fast forefoot runner.".to_string())
    }
}

pub fn m(id: &str, score: f32) -> Match {
    Match {
        id: id.to_string(),
        score,
        values: None,
    }
}

pub fn runner(name: &str, cadence: f64, heel: f64, vert: f64) -> RunnerRecord {
    RunnerRecord {
        name: name.to_string(),
        cadence,
        heel_strike: heel,
        vertical_oscillation: vert,
    }
}
