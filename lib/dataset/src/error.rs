/// Errors from loading or exporting datasets
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error opening or writing a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The export destination rejected the output.
    #[error("Failed to write export: {0}")]
    Write(#[source] std::io::Error),

    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the dataset cannot be read without.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A required cell that is empty or not a number.
    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        /// 1-based line number, counting the header.
        row: usize,
        column: String,
        value: String,
    },

    /// A saved selection refers to a rank that was not returned.
    #[error("Rank {0} is not part of the result")]
    UnknownRank(usize),

    /// The rows could not form a candidate pool.
    #[error(transparent)]
    Pool(#[from] similo_core::Error),
}
