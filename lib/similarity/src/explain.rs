//! Explainability for ranking results
//!
//! Turns a [`RankingResult`] into display-ready rows, summary statistics
//! and side-by-side comparisons of the reference and a returned location.

use crate::engine::{RankedLocation, RankingResult};
use crate::schema::{Category, CategoryValues, EntitySchema};
use serde::Serialize;
use similo_core::{Coordinates, LocationRecord, RecordId};
use std::collections::BTreeMap;

/// A returned location with its display labels and scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedResult {
    pub rank: usize,
    pub id: RecordId,
    pub label: String,
    pub ranking_label: String,
    pub overall: f64,
    pub scores: CategoryValues,
    pub coordinates: Coordinates,
}

impl ExplainedResult {
    pub fn from_ranked(ranked: &RankedLocation, schema: &EntitySchema) -> Self {
        Self {
            rank: ranked.rank,
            id: ranked.record.id.clone(),
            label: schema.label(&ranked.record),
            ranking_label: schema.ranking_label(ranked.rank, &ranked.record),
            overall: ranked.overall_score,
            scores: ranked.scores,
            coordinates: ranked.record.coordinates,
        }
    }
}

/// Response body for a ranking request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarResponse {
    pub reference: RecordId,
    pub reference_coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_center: Option<Coordinates>,
    pub result: Vec<ExplainedResult>,
}

impl SimilarResponse {
    pub fn from_ranking(ranking: &RankingResult, schema: &EntitySchema) -> Self {
        Self {
            reference: ranking.reference_id.clone(),
            reference_coordinates: ranking.reference_coordinates,
            map_center: map_center(&ranking.results),
            result: ranking
                .results
                .iter()
                .map(|r| ExplainedResult::from_ranked(r, schema))
                .collect(),
        }
    }
}

/// Mean position of the returned locations, used to centre a map
pub fn map_center(results: &[RankedLocation]) -> Option<Coordinates> {
    if results.is_empty() {
        return None;
    }
    let n = results.len() as f64;
    let lat = results.iter().map(|r| r.record.coordinates.lat).sum::<f64>() / n;
    let lon = results.iter().map(|r| r.record.coordinates.lon).sum::<f64>() / n;
    Some(Coordinates::new(lat, lon))
}

/// Summary statistics for a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of candidates scored
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Category where the best result matched the reference most closely
    pub top_category: Option<Category>,
}

impl SimilarityStats {
    pub fn compute(ranking: &RankingResult) -> Self {
        let results = &ranking.results;
        let Some(best) = results.first() else {
            return Self {
                candidates_count: ranking.candidates_considered,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_category: None,
            };
        };

        let avg_score =
            results.iter().map(|r| r.overall_score).sum::<f64>() / results.len() as f64;

        // First category wins ties
        let top_category = best
            .scores
            .iter()
            .fold(None::<(Category, f64)>, |acc, (category, score)| match acc {
                Some((_, top)) if top >= score => acc,
                _ => Some((category, score)),
            })
            .map(|(category, _)| category);

        Self {
            candidates_count: ranking.candidates_considered,
            results_count: results.len(),
            avg_score,
            best_score: best.overall_score,
            top_category,
        }
    }
}

/// One display value on both records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDelta {
    pub reference: f64,
    pub candidate: f64,
    /// candidate - reference
    pub delta: f64,
}

/// Side-by-side view of the reference and one returned location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub reference: RecordId,
    pub reference_label: String,
    pub candidate: RecordId,
    pub candidate_label: String,
    pub rank: usize,
    pub overall: f64,
    pub scores: CategoryValues,
    /// Raw columns present on both records
    pub features: BTreeMap<String, FeatureDelta>,
}

impl Comparison {
    pub fn new(reference: &LocationRecord, ranked: &RankedLocation, schema: &EntitySchema) -> Self {
        let features = reference
            .raw
            .iter()
            .filter_map(|(column, &reference_value)| {
                ranked.record.raw_value(column).map(|candidate_value| {
                    (
                        column.clone(),
                        FeatureDelta {
                            reference: reference_value,
                            candidate: candidate_value,
                            delta: candidate_value - reference_value,
                        },
                    )
                })
            })
            .collect();

        Self {
            reference: reference.id.clone(),
            reference_label: schema.label(reference),
            candidate: ranked.record.id.clone(),
            candidate_label: schema.label(&ranked.record),
            rank: ranked.rank,
            overall: ranked.overall_score,
            scores: ranked.scores,
            features,
        }
    }
}
