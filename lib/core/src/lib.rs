//! # Similo Core
//!
//! Core types for the Similo location similarity engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`LocationRecord`] - A ZIP code or city with coordinates and feature columns
//! - [`Vector`] - Dense feature vector with Euclidean distance
//! - [`CandidatePool`] - Immutable, indexed collection of records
//! - [`StateFilter`] - Restricts a pool to a set of states
//!
//! ## Example
//!
//! ```rust
//! use similo_core::{CandidatePool, Coordinates, Granularity, LocationRecord, RecordId, StateFilter};
//!
//! let records = vec![
//!     LocationRecord::new("44101", Coordinates::new(41.5, -81.7), "Ohio"),
//!     LocationRecord::new("73301", Coordinates::new(30.3, -97.7), "Texas"),
//! ];
//! let pool = CandidatePool::new(Granularity::Zip, records).unwrap();
//!
//! let cleveland = pool.get(&RecordId::new("44101")).unwrap();
//! assert_eq!(cleveland.state, "Ohio");
//!
//! let filter = StateFilter::new(["Texas"]);
//! assert_eq!(pool.filtered(&filter).count(), 1);
//! ```

pub mod error;
pub mod filter;
pub mod pool;
pub mod record;
pub mod vector;

pub use error::{Error, Result};
pub use filter::{Filter, StateFilter};
pub use pool::CandidatePool;
pub use record::{Coordinates, Granularity, LocationRecord, RecordId};
pub use vector::Vector;
