use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dataset granularity of a location record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Zip,
    City,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Zip => write!(f, "zip"),
            Granularity::City => write!(f, "city"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(Granularity::Zip),
            "city" => Ok(Granularity::City),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown granularity '{}'",
                other
            ))),
        }
    }
}

/// Identifier of a location: a ZIP code or a "City, ST" string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One row of a location dataset
///
/// `scaled` holds the standardized feature values used for distance
/// computation. `raw` holds the display values; they are carried through
/// ranking untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: RecordId,
    pub coordinates: Coordinates,
    /// Long state name, e.g. "New York"
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default)]
    pub scaled: BTreeMap<String, f64>,
    #[serde(default)]
    pub raw: BTreeMap<String, f64>,
}

impl LocationRecord {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<RecordId>, coordinates: Coordinates, state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinates,
            state: state.into(),
            state_short: None,
            county: None,
            scaled: BTreeMap::new(),
            raw: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_state_short(mut self, state_short: impl Into<String>) -> Self {
        self.state_short = Some(state_short.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_scaled(mut self, column: impl Into<String>, value: f64) -> Self {
        self.scaled.insert(column.into(), value);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_raw(mut self, column: impl Into<String>, value: f64) -> Self {
        self.raw.insert(column.into(), value);
        self
    }

    #[inline]
    pub fn scaled_value(&self, column: &str) -> Option<f64> {
        self.scaled.get(column).copied()
    }

    #[inline]
    pub fn raw_value(&self, column: &str) -> Option<f64> {
        self.raw.get(column).copied()
    }
}
