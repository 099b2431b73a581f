//! # Similo Similarity
//!
//! A multi-category similarity engine for locations.
//!
//! Given a reference ZIP code or city, a candidate pool and per-category
//! importance weights, the engine ranks the candidates by how closely their
//! scaled demographic, housing, employment and environmental features match
//! the reference.
//!
//! ## Features
//!
//! - **Entity Schema**: One engine for ZIP and city datasets, described by a schema
//! - **Category Distances**: Euclidean distance per category over scaled features
//! - **Weighted Ranking**: Weighted mean of category distances, stable tie-breaking
//! - **Explainability**: 0-100 scores per category, deep-dive comparisons
//!
//! ## Example
//!
//! ```rust
//! use similo_core::{CandidatePool, Coordinates, Granularity, LocationRecord};
//! use similo_similarity::{EntitySchema, RankingRequest, SimilarityEngine};
//!
//! let schema = EntitySchema::city();
//! let columns: Vec<String> = schema.feature_groups.all_columns().map(String::from).collect();
//! let record = |id: &str, value: f64| {
//!     columns.iter().fold(
//!         LocationRecord::new(id, Coordinates::new(40.0, -83.0), "Ohio"),
//!         |record, column| record.with_scaled(column.as_str(), value),
//!     )
//! };
//!
//! let pool = CandidatePool::new(
//!     Granularity::City,
//!     vec![record("Columbus, OH", 0.0), record("Dayton, OH", 0.5), record("Akron, OH", 1.0)],
//! ).unwrap();
//!
//! let engine = SimilarityEngine::new(schema).unwrap();
//! let ranking = engine.search(&pool, &RankingRequest::new("Columbus, OH")).unwrap();
//!
//! assert_eq!(ranking.results[0].record.id.as_str(), "Dayton, OH");
//! assert_eq!(ranking.results[0].overall_score, 50.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Request   │────>│   Engine    │<────│  Candidate  │
//! │ (ref, wts)  │     │  (schema)   │     │    Pool     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │   Explain   │
//!                     │  (results)  │
//!                     └─────────────┘
//! ```

pub mod schema;
pub mod distance;
pub mod weights;
pub mod engine;
pub mod request;
pub mod explain;
pub mod error;

// Re-export main types for convenience
pub use schema::{
    Category,
    CategoryValues,
    EntitySchema,
    FeatureGroups,
    SchemaError,
};
pub use weights::{CategoryWeights, RankingLimits};
pub use engine::{RankedLocation, RankingResult, SimilarityEngine};
pub use request::RankingRequest;
pub use explain::{Comparison, ExplainedResult, FeatureDelta, SimilarResponse, SimilarityStats, map_center};
pub use error::RankError;
