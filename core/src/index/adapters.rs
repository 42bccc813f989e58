use serde::Deserialize;
use serde_json::Value;

use super::types::Match;

#[derive(Debug, Clone, Deserialize)]
struct MatchCompat {
    id: String,

    #[serde(default)]
    score: f32,

    #[serde(default, alias = "vector")]
    values: Vec<f32>,
}

impl From<MatchCompat> for Match {
    fn from(c: MatchCompat) -> Self {
        Match {
            id: c.id,
            score: c.score,
            values: if c.values.is_empty() {
                None
            } else {
                Some(c.values)
            },
        }
    }
}

/// Accepts `{"matches": [...]}`, a bare array, or `null` (no matches).
/// The result is ordered by descending score; equal scores keep response order.
pub fn parse_query_matches(v: &Value) -> Result<Vec<Match>, String> {
    let arr = match v {
        Value::Null => return Ok(Vec::new()),
        Value::Array(a) => a.clone(),
        Value::Object(o) => match o.get("matches") {
            Some(Value::Array(a)) => a.clone(),
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(other) => return Err(format!("unexpected matches field: {other}")),
        },
        other => return Err(format!("unexpected query response: {other}")),
    };

    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let m: MatchCompat =
            serde_json::from_value(item).map_err(|e| format!("invalid match: {e}"))?;
        out.push(Match::from(m));
    }
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_pinecone_envelope() {
        let v = json!({
            "matches": [
                {"id": "Deer", "score": 0.987, "values": [0.98, 0.0, 0.19]},
                {"id": "Horse", "score": 0.91, "values": []}
            ],
            "namespace": ""
        });
        let out = parse_query_matches(&v).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "Deer");
        assert_eq!(out[0].values.as_ref().map(Vec::len), Some(3));
        assert_eq!(out[1].values, None);
    }

    #[test]
    fn sorts_descending_by_score() {
        let v = json!([
            {"id": "b", "score": 0.2},
            {"id": "a", "score": 0.9},
            {"id": "c", "score": 0.5}
        ]);
        let ids: Vec<String> = parse_query_matches(&v)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn empty_and_null_are_no_matches() {
        assert!(parse_query_matches(&Value::Null).unwrap().is_empty());
        assert!(parse_query_matches(&json!({})).unwrap().is_empty());
        assert!(parse_query_matches(&json!({"matches": []})).unwrap().is_empty());
    }

    #[test]
    fn rejects_match_without_id() {
        let err = parse_query_matches(&json!([{"score": 0.5}])).unwrap_err();
        assert!(err.contains("invalid match"));
    }
}
