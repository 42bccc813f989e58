//! Shared response handling for the HTTP-backed plugins.

use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Failure talking to the vector index or a generation backend.
#[derive(Debug, thiserror::Error)]
pub enum ServiceHttpError {
    #[error("{service} request to {url} timed out")]
    Timeout {
        service: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} request to {url} failed: {source}")]
    Transport {
        service: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned HTTP {status} from {url}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        url: String,
        body: String,
    },
    #[error("{service} sent an unreadable response from {url}: {message}")]
    Decode {
        service: &'static str,
        url: String,
        message: String,
    },
}

impl ServiceHttpError {
    pub fn service(&self) -> &'static str {
        match self {
            Self::Timeout { service, .. }
            | Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => *service,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn transport(service: &'static str, err: reqwest::Error, url: &str) -> Self {
        let url = redact_url(url);
        if err.is_timeout() {
            Self::Timeout {
                service,
                url,
                source: err,
            }
        } else {
            Self::Transport {
                service,
                url,
                source: err,
            }
        }
    }

    pub(crate) fn decode(service: &'static str, url: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            url: redact_url(url),
            message: message.into(),
        }
    }
}

/// Drop the query string so keys passed as parameters never reach logs.
fn redact_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Reads the body, turning non-2xx statuses and malformed JSON into
/// [`ServiceHttpError`]. An empty 2xx body comes back as `Value::Null`.
pub(crate) async fn parse_json_response(
    service: &'static str,
    resp: reqwest::Response,
) -> anyhow::Result<Value> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| ServiceHttpError::transport(service, err, &url))?;

    if !status.is_success() {
        return Err(ServiceHttpError::Status {
            service,
            status: status.as_u16(),
            url: redact_url(&url),
            body: preview_body(&body),
        }
        .into());
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str::<Value>(&body).map_err(|err| {
        ServiceHttpError::decode(service, &url, format!("{err} | body={}", preview_body(&body)))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates_on_char_boundary() {
        let body = "é".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_status_error_display() {
        let err = ServiceHttpError::Status {
            service: "pinecone",
            status: 401,
            url: "https://runners.svc.pinecone.io/query".to_string(),
            body: "unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pinecone returned HTTP 401 from https://runners.svc.pinecone.io/query: unauthorized"
        );
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.service(), "pinecone");
    }

    #[test]
    fn test_url_query_is_redacted() {
        let err = ServiceHttpError::decode(
            "gemini",
            "https://generativelanguage.googleapis.com/v1beta/models/m:generateContent?key=secret",
            "bad",
        );
        let msg = err.to_string();
        assert!(msg.contains("models/m:generateContent:"));
        assert!(!msg.contains("secret"));
        assert_eq!(err.status(), None);
    }
}
