//! Distance and score functions for category similarity
//!
//! Distances are Euclidean over a category's scaled columns. Scores map a
//! distance onto [0, 100] relative to the largest distance in the pool,
//! where 100 means identical.

use crate::schema::{Category, CategoryValues};
use crate::weights::CategoryWeights;
use similo_core::Vector;

/// Per-category Euclidean distances between two extracted records
pub fn category_distances(reference: &[Vector; 4], candidate: &[Vector; 4]) -> CategoryValues {
    CategoryValues::from_fn(|category| {
        let i = category.index();
        reference[i].l2_distance(&candidate[i])
    })
}

/// Weighted arithmetic mean of the per-category distances
///
/// Weighting is applied to raw distances, before conversion to scores.
/// Categories with larger distance ranges therefore carry more influence
/// at equal weight.
pub fn weighted_distance(distances: &CategoryValues, weights: &CategoryWeights) -> f64 {
    let weighted: f64 = distances
        .iter()
        .map(|(category, distance)| weights.get(category) * distance)
        .sum();
    weighted / weights.total()
}

/// Largest value seen in the pool for each category and for the overall distance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoolMaxima {
    pub categories: CategoryValues,
    pub overall: f64,
}

impl PoolMaxima {
    pub fn observe(&mut self, distances: &CategoryValues, overall: f64) {
        let current = self.categories;
        self.categories = CategoryValues::from_fn(|category| {
            current.get(category).max(distances.get(category))
        });
        self.overall = self.overall.max(overall);
    }

    pub fn category(&self, category: Category) -> f64 {
        self.categories.get(category)
    }
}

/// Convert a distance into a similarity score in [0, 100]
///
/// A zero maximum means every candidate matched the reference on this
/// dimension, so every score is 100.
#[inline]
pub fn similarity_score(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return 100.0;
    }
    // Same as 100 - 100 * d / max, but exact when d == max
    (100.0 * (1.0 - distance / max_distance)).clamp(0.0, 100.0)
}

/// Scores for every category given the pool maxima
pub fn category_scores(distances: &CategoryValues, maxima: &PoolMaxima) -> CategoryValues {
    CategoryValues::from_fn(|category| {
        similarity_score(distances.get(category), maxima.category(category))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(people: [f64; 2]) -> [Vector; 4] {
        [
            Vector::from_slice(&people),
            Vector::new(vec![0.0, 0.0]),
            Vector::new(vec![0.0, 0.0]),
            Vector::new(vec![0.0, 0.0]),
        ]
    }

    #[test]
    fn test_category_distances() {
        let distances = category_distances(&extracted([0.0, 0.0]), &extracted([3.0, 4.0]));
        assert!((distances.people - 5.0).abs() < 1e-12);
        assert_eq!(distances.home, 0.0);
        assert_eq!(distances.work, 0.0);
        assert_eq!(distances.environment, 0.0);
    }

    #[test]
    fn test_weighted_distance_equal_weights_is_mean() {
        let distances = CategoryValues {
            people: 1.0,
            home: 2.0,
            work: 3.0,
            environment: 6.0,
        };
        let overall = weighted_distance(&distances, &CategoryWeights::default());
        assert!((overall - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_distance_respects_weights() {
        let distances = CategoryValues {
            people: 4.0,
            home: 0.0,
            work: 0.0,
            environment: 0.0,
        };
        let weights = CategoryWeights::new(2.0, 1.0, 0.5, 0.5);
        // (2 * 4) / 4
        assert!((weighted_distance(&distances, &weights) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_score() {
        assert_eq!(similarity_score(0.0, 2.0), 100.0);
        assert_eq!(similarity_score(1.0, 2.0), 50.0);
        assert_eq!(similarity_score(2.0, 2.0), 0.0);
    }

    #[test]
    fn test_similarity_score_zero_max() {
        assert_eq!(similarity_score(0.0, 0.0), 100.0);
    }

    #[test]
    fn test_pool_maxima() {
        let mut maxima = PoolMaxima::default();
        maxima.observe(
            &CategoryValues { people: 1.0, home: 5.0, work: 0.0, environment: 2.0 },
            2.0,
        );
        maxima.observe(
            &CategoryValues { people: 3.0, home: 1.0, work: 0.0, environment: 2.5 },
            1.5,
        );
        assert_eq!(maxima.category(Category::People), 3.0);
        assert_eq!(maxima.category(Category::Home), 5.0);
        assert_eq!(maxima.category(Category::Work), 0.0);
        assert_eq!(maxima.category(Category::Environment), 2.5);
        assert_eq!(maxima.overall, 2.0);
    }
}
