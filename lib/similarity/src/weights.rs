//! Category importance weights and the bounds they are checked against

use crate::error::RankError;
use crate::schema::Category;
use serde::{Deserialize, Serialize};

/// Relative importance of each category; 1.0 is neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    #[serde(default = "neutral_weight")]
    pub people: f64,
    #[serde(default = "neutral_weight")]
    pub home: f64,
    #[serde(default = "neutral_weight")]
    pub work: f64,
    #[serde(default = "neutral_weight")]
    pub environment: f64,
}

fn neutral_weight() -> f64 {
    1.0
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::uniform(neutral_weight())
    }
}

impl CategoryWeights {
    pub fn new(people: f64, home: f64, work: f64, environment: f64) -> Self {
        Self {
            people,
            home,
            work,
            environment,
        }
    }

    pub fn uniform(weight: f64) -> Self {
        Self::new(weight, weight, weight, weight)
    }

    #[inline]
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::People => self.people,
            Category::Home => self.home,
            Category::Work => self.work,
            Category::Environment => self.environment,
        }
    }

    #[must_use]
    pub fn with(mut self, category: Category, weight: f64) -> Self {
        match category {
            Category::People => self.people = weight,
            Category::Home => self.home = weight,
            Category::Work => self.work = weight,
            Category::Environment => self.environment = weight,
        }
        self
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Accepted ranges for request parameters
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingLimits {
    pub min_weight: f64,
    pub max_weight: f64,
    pub min_results: usize,
    pub max_results: usize,
    pub default_results: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            min_weight: 0.1,
            max_weight: 2.0,
            min_results: 5,
            max_results: 25,
            default_results: 10,
        }
    }
}

impl RankingLimits {
    pub fn check_weights(&self, weights: &CategoryWeights) -> Result<(), RankError> {
        for category in Category::ALL {
            let value = weights.get(category);
            // NaN fails both comparisons and is rejected too
            if !(value >= self.min_weight && value <= self.max_weight) || value <= 0.0 {
                return Err(RankError::InvalidWeight {
                    category,
                    value,
                    min: self.min_weight,
                    max: self.max_weight,
                });
            }
        }
        Ok(())
    }

    pub fn check_result_count(&self, count: usize) -> Result<(), RankError> {
        if count == 0 || count < self.min_results || count > self.max_results {
            return Err(RankError::InvalidResultCount {
                count,
                min: self.min_results,
                max: self.max_results,
            });
        }
        Ok(())
    }
}
