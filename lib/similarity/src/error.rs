//! Errors reported by the ranking engine

use crate::schema::Category;

/// Failure outcomes of a ranking request
///
/// None of these are retried. A zero normalization maximum is not an
/// error; it yields a score of 100 on that dimension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("No candidate locations available for this filter")]
    EmptyCandidatePool,

    #[error("Location '{record}' is missing feature column '{column}'")]
    SchemaMismatch { record: String, column: String },

    #[error("Location '{record}' has a non-finite value in feature column '{column}'")]
    NonFiniteFeature { record: String, column: String },

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Weight for {category} must be between {min} and {max}, got {value}")]
    InvalidWeight {
        category: Category,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Result count must be between {min} and {max}, got {count}")]
    InvalidResultCount { count: usize, min: usize, max: usize },

    #[error("Schema is for {expected} records but the pool holds {actual} records")]
    GranularityMismatch {
        expected: similo_core::Granularity,
        actual: similo_core::Granularity,
    },
}
