//! CSV export of saved results

use crate::error::DatasetError;
use similo_similarity::{EntitySchema, SimilarResponse};
use std::io::Write;

/// A result row the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRow {
    pub rank: usize,
    pub notes: String,
}

impl SavedRow {
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Writes the saved rows of a response as CSV, in rank order.
///
/// Returns the number of rows written.
pub fn export_saved<W: Write>(
    writer: W,
    response: &SimilarResponse,
    schema: &EntitySchema,
    saved: &[SavedRow],
) -> Result<usize, DatasetError> {
    if let Some(missing) = saved
        .iter()
        .find(|s| !response.result.iter().any(|r| r.rank == s.rank))
    {
        return Err(DatasetError::UnknownRank(missing.rank));
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        schema.id_column.as_str(),
        "LABEL",
        "RANK",
        "OVERALL",
        "PEOPLE",
        "HOME",
        "WORK",
        "ENVIRONMENT",
        "SAVE",
        "NOTES",
    ])?;

    let mut written = 0;
    for row in &response.result {
        let Some(selection) = saved.iter().find(|s| s.rank == row.rank) else {
            continue;
        };
        csv_writer.write_record([
            row.id.to_string(),
            row.label.clone(),
            row.rank.to_string(),
            row.overall.to_string(),
            row.scores.people.to_string(),
            row.scores.home.to_string(),
            row.scores.work.to_string(),
            row.scores.environment.to_string(),
            "true".to_string(),
            selection.notes.clone(),
        ])?;
        written += 1;
    }

    csv_writer.flush().map_err(DatasetError::Write)?;
    Ok(written)
}
