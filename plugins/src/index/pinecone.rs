use anyhow::Result;
use async_trait::async_trait;
use gait_core::api as core_api;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{parse_json_response, ServiceHttpError};

const SERVICE: &str = "pinecone";

#[derive(Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_values: bool,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
struct IndexDescription {
    #[serde(default)]
    host: String,
}

/// Data-plane client for a Pinecone index.
#[derive(Clone)]
pub struct PineconeIndex {
    index_name: String,
    api_key: String,
    namespace: Option<String>,
    http: reqwest::Client,
    url_upsert: String,
    url_query: String,
}

impl PineconeIndex {
    /// Builds the client, resolving the data-plane host from `index_name` when
    /// no host is configured.
    pub async fn connect(cfg: &core_api::PineconeConfig) -> Result<Self> {
        if !cfg.host.trim().is_empty() {
            return Self::new(cfg);
        }
        let host = Self::describe_host(cfg).await?;
        let resolved = core_api::PineconeConfig {
            host,
            ..cfg.clone()
        };
        Self::new(&resolved)
    }

    async fn describe_host(cfg: &core_api::PineconeConfig) -> Result<String> {
        let url = format!(
            "{}/indexes/{}",
            cfg.control_url.trim().trim_end_matches('/'),
            cfg.index_name
        );
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.describe.in",
            url = %url,
            index = %cfg.index_name
        );
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()?;
        let mut req = http.get(&url);
        if !cfg.api_key.trim().is_empty() {
            req = req.header("Api-Key", &cfg.api_key);
        }
        let resp = req
            .send()
            .await
            .map_err(|err| ServiceHttpError::transport(SERVICE, err, &url))?;
        let v = parse_json_response(SERVICE, resp).await?;
        let desc: IndexDescription = serde_json::from_value(v)
            .map_err(|e| ServiceHttpError::decode(SERVICE, &url, e.to_string()))?;
        if desc.host.trim().is_empty() {
            anyhow::bail!(
                "pinecone index '{}' has no host (set index.host or PINECONE_HOST)",
                cfg.index_name
            );
        }
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.describe.out",
            host = %desc.host
        );
        Ok(desc.host)
    }

    pub fn new(cfg: &core_api::PineconeConfig) -> Result<Self> {
        let host = cfg.host.trim().trim_end_matches('/');
        if host.is_empty() {
            anyhow::bail!(
                "pinecone host is not set for index '{}' (set index.host or PINECONE_HOST)",
                cfg.index_name
            );
        }
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self {
            index_name: cfg.index_name.clone(),
            api_key: cfg.api_key.clone(),
            namespace: cfg
                .namespace
                .clone()
                .filter(|ns| !ns.trim().is_empty()),
            http,
            url_upsert: format!("{base}/vectors/upsert"),
            url_query: format!("{base}/query"),
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.header("Api-Key", &self.api_key)
        }
    }

    async fn post(&self, url: &str, body: &impl Serialize) -> Result<Value> {
        let req = self.http.post(url).json(body);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ServiceHttpError::transport(SERVICE, err, url))?;
        parse_json_response(SERVICE, resp).await
    }
}

#[async_trait]
impl core_api::VectorIndex for PineconeIndex {
    fn name(&self) -> &str {
        &self.index_name
    }

    async fn upsert(&self, entries: &[core_api::IndexEntry]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }
        let url = &self.url_upsert;
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.upsert.in",
            url = %url,
            index = %self.index_name,
            vectors = entries.len()
        );
        let body = UpsertRequest {
            vectors: entries
                .iter()
                .map(|e| UpsertVector {
                    id: &e.id,
                    values: &e.values,
                })
                .collect(),
            namespace: self.namespace.as_deref(),
        };
        let v = self.post(url, &body).await?;
        let count = v
            .get("upsertedCount")
            .and_then(Value::as_u64)
            .map_or(entries.len(), |n| n as usize);
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.upsert.out",
            upserted = count
        );
        Ok(count)
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<core_api::Match>> {
        let url = &self.url_query;
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.query.in",
            url = %url,
            index = %self.index_name,
            top_k = top_k
        );
        let body = QueryRequest {
            vector,
            top_k,
            include_values: true,
            include_metadata: true,
            namespace: self.namespace.as_deref(),
        };
        let v = self.post(url, &body).await?;
        let mut out = core_api::parse_query_matches(&v).map_err(|e| anyhow::anyhow!(e))?;
        out.truncate(top_k);
        tracing::debug!(
            target: "gait.index",
            stage = "index.http.query.out",
            matches = out.len()
        );
        Ok(out)
    }
}
