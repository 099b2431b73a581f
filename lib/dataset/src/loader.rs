//! CSV dataset loading
//!
//! Reads a master ZIP or city table into an immutable [`CandidatePool`].
//! Headers are matched case-insensitively. Columns named in the schema's
//! feature groups become scaled features; any other numeric column is kept
//! as a raw display value.

use crate::error::DatasetError;
use similo_core::{CandidatePool, Coordinates, Granularity, LocationRecord};
use similo_similarity::EntitySchema;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const LAT: &str = "LAT";
const LON: &str = "LON";
const STATE_LONG: &str = "STATE_LONG";
const STATE_SHORT: &str = "STATE_SHORT";
const COUNTY_NAME: &str = "COUNTY_NAME";
/// Census name for the ZIP column in the raw ZIP table
const ZCTA5: &str = "ZCTA5";

/// Loads a dataset from a CSV file.
pub fn load_csv(path: impl AsRef<Path>, schema: &EntitySchema) -> Result<CandidatePool, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let pool = load_reader(file, schema)?;
    tracing::info!(
        "loaded {} {} records from {}",
        pool.len(),
        schema.granularity,
        path.display()
    );
    Ok(pool)
}

/// Loads a dataset from any `Read` source.
pub fn load_reader(reader: impl Read, schema: &EntitySchema) -> Result<CandidatePool, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_uppercase())
        .collect();
    let layout = ColumnLayout::resolve(&headers, schema)?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = result?;
        // Line 1 is the header
        records.push(layout.parse(&row, i + 2)?);
    }

    Ok(CandidatePool::new(schema.granularity, records)?)
}

/// Column positions resolved from the header row
struct ColumnLayout {
    granularity: Granularity,
    id: (usize, String),
    lat: usize,
    lon: usize,
    state: usize,
    state_short: Option<usize>,
    county: Option<usize>,
    scaled: Vec<(usize, String)>,
    raw: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn resolve(headers: &[String], schema: &EntitySchema) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        let id_name = schema.id_column.to_uppercase();
        let id = match (find(&id_name), schema.granularity) {
            (Some(index), _) => index,
            (None, Granularity::Zip) => find(ZCTA5).ok_or(DatasetError::MissingColumn(id_name.clone()))?,
            (None, Granularity::City) => return Err(DatasetError::MissingColumn(id_name)),
        };
        let lat = require(LAT)?;
        let lon = require(LON)?;
        let state = require(STATE_LONG)?;
        let state_short = find(STATE_SHORT);
        let county = find(COUNTY_NAME);

        let scaled: Vec<(usize, String)> = schema
            .feature_groups
            .all_columns()
            .filter_map(|column| find(&column.to_uppercase()).map(|index| (index, column.to_string())))
            .collect();

        let mut reserved = vec![id, lat, lon, state];
        reserved.extend(state_short);
        reserved.extend(county);
        reserved.extend(scaled.iter().map(|(index, _)| *index));

        let raw = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !reserved.contains(index))
            .map(|(index, name)| (index, name.clone()))
            .collect();

        Ok(Self {
            granularity: schema.granularity,
            id: (id, id_name),
            lat,
            lon,
            state,
            state_short,
            county,
            scaled,
            raw,
        })
    }

    fn parse(&self, row: &csv::StringRecord, line: usize) -> Result<LocationRecord, DatasetError> {
        let cell = |index: usize| row.get(index).map(str::trim).unwrap_or("");
        let optional = |index: Option<usize>| {
            index
                .map(cell)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let coordinate = |index: usize, column: &str| {
            let value = cell(index);
            parse_finite(value).ok_or_else(|| DatasetError::InvalidValue {
                row: line,
                column: column.to_string(),
                value: value.to_string(),
            })
        };

        let (id_index, id_name) = &self.id;
        let raw_id = cell(*id_index);
        if raw_id.is_empty() {
            return Err(DatasetError::InvalidValue {
                row: line,
                column: id_name.clone(),
                value: String::new(),
            });
        }
        let id = match self.granularity {
            Granularity::Zip => format!("{:0>5}", raw_id),
            Granularity::City => raw_id.to_string(),
        };

        let mut record = LocationRecord::new(
            id,
            Coordinates::new(coordinate(self.lat, LAT)?, coordinate(self.lon, LON)?),
            cell(self.state),
        );
        record.state_short = optional(self.state_short);
        record.county = optional(self.county);

        for (index, column) in &self.scaled {
            let value = cell(*index);
            // Empty cells stay absent; ranking reports them as a schema mismatch
            if value.is_empty() {
                continue;
            }
            let parsed = parse_finite(value).ok_or_else(|| DatasetError::InvalidValue {
                row: line,
                column: column.clone(),
                value: value.to_string(),
            })?;
            record.scaled.insert(column.clone(), parsed);
        }

        // Text columns such as metro descriptions are not display values
        for (index, column) in &self.raw {
            if let Ok(value) = cell(*index).parse::<f64>() {
                record.raw.insert(column.clone(), value);
            }
        }

        Ok(record)
    }
}

/// `f64::from_str` accepts "NaN" and "inf"; features and coordinates may not hold them
fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
