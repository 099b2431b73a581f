//! Entity schema definitions
//!
//! Describes how a location dataset is compared: which scaled columns make
//! up each category, which column identifies a record, and how a record is
//! labelled for display. ZIP and city datasets share one engine and differ
//! only in their [`EntitySchema`] descriptor.

use crate::error::RankError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use similo_core::{Granularity, LocationRecord, Vector};

/// A named group of related scaled features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Home,
    Work,
    Environment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::People,
        Category::Home,
        Category::Work,
        Category::Environment,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::People => 0,
            Category::Home => 1,
            Category::Work => 2,
            Category::Environment => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Home => "home",
            Category::Work => "work",
            Category::Environment => "environment",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per category, used for distances and scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryValues {
    pub people: f64,
    pub home: f64,
    pub work: f64,
    pub environment: f64,
}

impl CategoryValues {
    pub fn from_fn(mut f: impl FnMut(Category) -> f64) -> Self {
        Self {
            people: f(Category::People),
            home: f(Category::Home),
            work: f(Category::Work),
            environment: f(Category::Environment),
        }
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

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Ordered scaled feature columns for each category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGroups {
    pub people: Vec<String>,
    pub home: Vec<String>,
    pub work: Vec<String>,
    pub environment: Vec<String>,
}

impl Default for FeatureGroups {
    fn default() -> Self {
        fn columns(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }

        Self {
            people: columns(&[
                "MED_AGE_SC",
                "PCT_UNDER_18_SC",
                "MED_HH_INC_SC",
                "PCT_POVERTY_SC",
                "PCT_BACH_MORE_SC",
            ]),
            home: columns(&[
                "HH_SIZE_SC",
                "PCT_OWN_SC",
                "MED_HOME_SC",
                "PCT_UNIT1_SC",
                "PCT_UNIT24_SC",
            ]),
            work: columns(&[
                "MEAN_COMMUTE_SC",
                "PCT_WC_SC",
                "PCT_WORKING_SC",
                "PCT_SERVICE_SC",
                "PCT_BC_SC",
            ]),
            environment: columns(&[
                "PCT_WATER_SC",
                "ENV_INDEX_SC",
                "PCT_TOPARK_ONEMILE_SC",
                "POP_DENSITY_SC",
                "METRO_INDEX_SC",
            ]),
        }
    }
}

impl FeatureGroups {
    pub fn columns(&self, category: Category) -> &[String] {
        match category {
            Category::People => &self.people,
            Category::Home => &self.home,
            Category::Work => &self.work,
            Category::Environment => &self.environment,
        }
    }

    /// Every configured column, category by category
    pub fn all_columns(&self) -> impl Iterator<Item = &str> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.columns(c).iter().map(String::as_str))
    }

    /// Check the mapping is internally consistent
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = AHashSet::new();
        for category in Category::ALL {
            let columns = self.columns(category);
            if columns.is_empty() {
                return Err(SchemaError::EmptyCategory(category));
            }
            for column in columns {
                if !seen.insert(column.as_str()) {
                    return Err(SchemaError::DuplicateColumn(column.clone()));
                }
            }
        }
        Ok(())
    }

    /// Pull one feature vector per category out of a record
    ///
    /// Every column must be present and finite.
    pub fn extract(&self, record: &LocationRecord) -> Result<[Vector; 4], RankError> {
        let vector_for = |category: Category| -> Result<Vector, RankError> {
            self.columns(category)
                .iter()
                .map(|column| match record.scaled_value(column) {
                    Some(value) if value.is_finite() => Ok(value),
                    Some(_) => Err(RankError::NonFiniteFeature {
                        record: record.id.to_string(),
                        column: column.clone(),
                    }),
                    None => Err(RankError::SchemaMismatch {
                        record: record.id.to_string(),
                        column: column.clone(),
                    }),
                })
                .collect::<Result<Vec<f64>, _>>()
                .map(Vector::new)
        };

        Ok([
            vector_for(Category::People)?,
            vector_for(Category::Home)?,
            vector_for(Category::Work)?,
            vector_for(Category::Environment)?,
        ])
    }
}

/// Describes one dataset granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub granularity: Granularity,
    /// Column holding the record identifier
    pub id_column: String,
    #[serde(default)]
    pub feature_groups: FeatureGroups,
}

impl EntitySchema {
    pub fn zip() -> Self {
        Self {
            granularity: Granularity::Zip,
            id_column: "ZIP".to_string(),
            feature_groups: FeatureGroups::default(),
        }
    }

    pub fn city() -> Self {
        Self {
            granularity: Granularity::City,
            id_column: "CITYSTATE".to_string(),
            feature_groups: FeatureGroups::default(),
        }
    }

    pub fn for_granularity(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Zip => Self::zip(),
            Granularity::City => Self::city(),
        }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.id_column.trim().is_empty() {
            return Err(SchemaError::MissingIdColumn);
        }
        self.feature_groups.validate()
    }

    /// Human readable label for a record
    pub fn label(&self, record: &LocationRecord) -> String {
        match self.granularity {
            Granularity::City => record.id.to_string(),
            Granularity::Zip => {
                let county = record.county.as_deref().unwrap_or("Unknown");
                let state = record.state_short.as_deref().unwrap_or(&record.state);
                format!("Zip Code {} from {} County, {}", record.id, county, state)
            }
        }
    }

    /// Label prefixed by the record's rank
    pub fn ranking_label(&self, rank: usize, record: &LocationRecord) -> String {
        format!("{} - {}", rank, self.label(record))
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Category '{0}' has no feature columns")]
    EmptyCategory(Category),

    #[error("Column '{0}' is listed more than once")]
    DuplicateColumn(String),

    #[error("Identifier column cannot be empty")]
    MissingIdColumn,
}
