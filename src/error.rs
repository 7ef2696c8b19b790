use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading tables or building figures.
///
/// Nothing here is retried or recovered: the first error aborts the whole
/// render call and no partial output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested metric name is not in the fixed vocabulary.
    #[error("variable name not recognized: '{0}'")]
    UnrecognizedVariable(String),

    /// A metric made it into the effective list but has no colour assigned.
    /// There is deliberately no fallback colour.
    #[error("no colour assigned to variable '{0}'")]
    MissingColor(String),

    /// A table file could not be opened or parsed.
    #[error("failed to read table '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The descriptor table needs at least a name and a description column.
    #[error("descriptor table '{path}' has fewer than two columns")]
    DescriptorShape { path: PathBuf },

    /// The observation table is missing one of its required columns.
    #[error("table '{path}' is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    /// A metric cell held something that is not a number (and not empty).
    #[error("table '{path}', row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// A cohort label other than USER or API.
    #[error("table '{path}', row {row}: unknown SOURCE label '{value}'")]
    InvalidSource {
        path: PathBuf,
        row: usize,
        value: String,
    },
}
