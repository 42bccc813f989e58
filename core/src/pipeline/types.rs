use crate::embed::GaitVector;
use crate::index::Match;
use crate::records::GaitMetrics;

/// Outcome of a retrieval. An empty neighbourhood is a valid result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    NoResults {
        query: GaitVector,
    },
    Matches {
        query: GaitVector,
        matches: Vec<Match>,
    },
}

impl Retrieval {
    pub fn query_vector(&self) -> &GaitVector {
        match self {
            Self::NoResults { query } | Self::Matches { query, .. } => query,
        }
    }

    pub fn matches(&self) -> &[Match] {
        match self {
            Self::NoResults { .. } => &[],
            Self::Matches { matches, .. } => matches,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Nothing similar was found; the generator was not called.
    NoResults { query: GaitVector },
    Generated {
        metrics: GaitMetrics,
        query: GaitVector,
        matches: Vec<Match>,
        context: String,
        prompt: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub index: String,
    /// Every embedded record, in file order.
    pub prepared: Vec<(String, GaitVector)>,
    pub upserted: usize,
}
