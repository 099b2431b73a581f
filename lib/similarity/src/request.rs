//! Ranking requests against a loaded dataset

use crate::engine::{RankingResult, SimilarityEngine};
use crate::error::RankError;
use crate::weights::{CategoryWeights, RankingLimits};
use serde::{Deserialize, Serialize};
use similo_core::{CandidatePool, RecordId, StateFilter};

/// Everything a caller selects for one ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    /// Identifier of the reference location
    pub reference: RecordId,
    /// Long state names to restrict candidates to; empty means all states
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub weights: CategoryWeights,
    #[serde(default = "default_result_count")]
    pub result_count: usize,
}

fn default_result_count() -> usize {
    RankingLimits::default().default_results
}

impl RankingRequest {
    pub fn new(reference: impl Into<RecordId>) -> Self {
        Self {
            reference: reference.into(),
            states: Vec::new(),
            weights: CategoryWeights::default(),
            result_count: default_result_count(),
        }
    }

    #[must_use]
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }
}

impl SimilarityEngine {
    /// Resolve and run a request against a dataset
    ///
    /// The reference is looked up in the whole pool, so it can be compared
    /// against states it does not belong to. The state filter only narrows
    /// the candidates.
    pub fn search(
        &self,
        pool: &CandidatePool,
        request: &RankingRequest,
    ) -> Result<RankingResult, RankError> {
        if pool.granularity() != self.schema().granularity {
            return Err(RankError::GranularityMismatch {
                expected: self.schema().granularity,
                actual: pool.granularity(),
            });
        }

        let reference = pool
            .get(&request.reference)
            .map_err(|_| RankError::NotFound(request.reference.to_string()))?;

        let filter = StateFilter::new(request.states.iter().cloned());
        self.rank(
            reference,
            pool.filtered(&filter),
            &request.weights,
            request.result_count,
        )
    }
}
