//! # Similo
//!
//! Find the locations across the United States that are most similar to a
//! chosen ZIP code or city.
//!
//! Similo compares locations on four categories of pre-scaled features
//! (people, home, work and environment), combines them with user-chosen
//! importance weights and returns a ranked list with 0-100 similarity
//! scores per category.
//!
//! ## Quick Start
//!
//! ### From the Command Line
//!
//! ```bash
//! similo --data MASTER_ZIP.csv --reference 43215 --state Ohio --count 10
//! similo --data MASTER_CITY.csv --granularity city --reference "Boston, MA" --home 2.0
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use similo::prelude::*;
//!
//! let schema = EntitySchema::zip();
//! let pool = load_csv("MASTER_ZIP.csv", &schema).unwrap();
//! let engine = SimilarityEngine::new(schema).unwrap();
//!
//! let request = RankingRequest::new("43215")
//!     .with_states(["Ohio"])
//!     .with_weights(CategoryWeights::default().with(Category::Work, 1.5))
//!     .with_result_count(10);
//! let ranking = engine.search(&pool, &request).unwrap();
//!
//! for location in &ranking.results {
//!     println!("{} {} {:.1}", location.rank, location.record.id, location.overall_score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! Similo is composed of several crates:
//!
//! - `similo-core` - Location records, vectors, candidate pools and filters
//! - `similo-similarity` - Entity schemas, the similarity engine and explanations
//! - `similo-dataset` - CSV loading and export

// Re-export core types
pub use similo_core::{
    CandidatePool, Coordinates, Granularity,
    LocationRecord, RecordId, Vector,
    Filter, StateFilter,
    Error, Result,
};

// Re-export the engine
pub use similo_similarity::{
    Category, CategoryValues, CategoryWeights,
    EntitySchema, FeatureGroups, RankingLimits,
    RankingRequest, RankingResult, RankedLocation,
    SimilarityEngine, RankError, SchemaError,
    Comparison, ExplainedResult, SimilarResponse, SimilarityStats,
};

// Re-export dataset I/O
pub use similo_dataset::{load_csv, load_reader, export_saved, DatasetError, SavedRow};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CandidatePool, Coordinates, Granularity,
        LocationRecord, RecordId,
        Category, CategoryWeights, EntitySchema, RankingLimits,
        RankingRequest, RankingResult, SimilarityEngine, RankError,
        Comparison, SimilarResponse, SimilarityStats,
        load_csv, export_saved, SavedRow,
    };
}
