use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Data access errors
    #[error("Wine database not found at {path:?}")]
    NotFound { path: PathBuf },
    #[error("Failed to open wine database {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Query for report '{report}' failed")]
    Query {
        report: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Incompatible database schema: table '{table}' not found")]
    MissingTable { table: &'static str },
    #[error("Incompatible database schema: table '{table}' has no column '{column}'")]
    MissingSchemaColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Failed to close wine database")]
    Close(#[source] rusqlite::Error),

    // Table contract errors
    #[error("Table has no column named '{column}'")]
    MissingColumn { column: String },
    #[error("Value in column '{column}' at row {row} is not a number")]
    NotNumeric { column: String, row: usize },

    #[error("Failed to serialize map markers")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for every failure that comes from reaching or querying the store
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::Open { .. }
                | Error::Query { .. }
                | Error::MissingTable { .. }
                | Error::MissingSchemaColumn { .. }
                | Error::Close(_)
        )
    }

    pub(crate) fn missing_column(column: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
        }
    }
}
