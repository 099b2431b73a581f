//! Similarity engine
//!
//! Scores every candidate against a reference record category by category,
//! combines the category distances with the request weights, normalizes
//! against the pool maxima and returns the closest locations in rank order.

use crate::distance::{category_distances, category_scores, similarity_score, weighted_distance, PoolMaxima};
use crate::error::RankError;
use crate::schema::{CategoryValues, EntitySchema, SchemaError};
use crate::weights::{CategoryWeights, RankingLimits};
use serde::Serialize;
use similo_core::{Coordinates, LocationRecord, RecordId};
use tracing::debug;

/// One returned location with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLocation {
    /// 1-based, 1 is the closest location other than the reference
    pub rank: usize,
    pub record: LocationRecord,
    pub distances: CategoryValues,
    pub overall_distance: f64,
    /// Per-category similarity on [0, 100]
    pub scores: CategoryValues,
    pub overall_score: f64,
}

/// Ranked output of a single request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub reference_id: RecordId,
    pub reference_coordinates: Coordinates,
    /// Size of the pool the scores were normalized over
    pub candidates_considered: usize,
    pub results: Vec<RankedLocation>,
}

impl RankingResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Find a returned location by its rank
    pub fn by_rank(&self, rank: usize) -> Option<&RankedLocation> {
        self.results.iter().find(|r| r.rank == rank)
    }
}

struct Measured<'a> {
    record: &'a LocationRecord,
    distances: CategoryValues,
    overall: f64,
}

/// Ranks candidate locations by similarity to a reference
///
/// The engine holds only configuration. Each call to [`rank`](Self::rank)
/// is a pure computation over the borrowed inputs, so one engine can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    schema: EntitySchema,
    limits: RankingLimits,
}

impl SimilarityEngine {
    /// Create an engine for the given schema with the default limits
    pub fn new(schema: EntitySchema) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self {
            schema,
            limits: RankingLimits::default(),
        })
    }

    #[must_use]
    pub fn with_limits(mut self, limits: RankingLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn limits(&self) -> &RankingLimits {
        &self.limits
    }

    /// Rank `candidates` by similarity to `reference`
    ///
    /// # Arguments
    /// * `reference` - The location to compare against; it may or may not be in the pool
    /// * `candidates` - The (already filtered) candidate pool, in tie-break order
    /// * `weights` - Category importance, checked against the engine limits
    /// * `result_count` - Maximum number of locations to return
    ///
    /// # Returns
    /// Up to `result_count` locations, closest first, excluding the reference
    pub fn rank<'a, I>(
        &self,
        reference: &LocationRecord,
        candidates: I,
        weights: &CategoryWeights,
        result_count: usize,
    ) -> Result<RankingResult, RankError>
    where
        I: IntoIterator<Item = &'a LocationRecord>,
    {
        self.limits.check_weights(weights)?;
        self.limits.check_result_count(result_count)?;

        let groups = &self.schema.feature_groups;
        let reference_vectors = groups.extract(reference)?;

        let mut maxima = PoolMaxima::default();
        let mut measured = Vec::new();
        for record in candidates {
            let vectors = groups.extract(record)?;
            let distances = category_distances(&reference_vectors, &vectors);
            let overall = weighted_distance(&distances, weights);
            maxima.observe(&distances, overall);
            measured.push(Measured {
                record,
                distances,
                overall,
            });
        }

        if measured.is_empty() {
            return Err(RankError::EmptyCandidatePool);
        }
        let candidates_considered = measured.len();

        // Stable: equal distances keep pool order
        measured.sort_by(|a, b| a.overall.total_cmp(&b.overall));

        let results: Vec<RankedLocation> = measured
            .into_iter()
            .filter(|m| m.record.id != reference.id)
            .take(result_count)
            .enumerate()
            .map(|(i, m)| RankedLocation {
                rank: i + 1,
                record: m.record.clone(),
                scores: category_scores(&m.distances, &maxima),
                overall_score: similarity_score(m.overall, maxima.overall),
                distances: m.distances,
                overall_distance: m.overall,
            })
            .collect();

        if results.is_empty() {
            return Err(RankError::EmptyCandidatePool);
        }

        debug!(
            reference = %reference.id,
            candidates = candidates_considered,
            returned = results.len(),
            overall_max = maxima.overall,
            "ranked candidate pool"
        );

        Ok(RankingResult {
            reference_id: reference.id.clone(),
            reference_coordinates: reference.coordinates,
            candidates_considered,
            results,
        })
    }
}
