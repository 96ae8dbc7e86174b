use thiserror::Error;

/// Failures surfaced by the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write carried an empty (or all-whitespace) ticker.
    #[error("ticker must be a non-empty string")]
    InvalidKey,

    /// A lookup by ticker found no record.
    #[error("no record for ticker '{0}'")]
    NotFound(String),

    /// The storage backend rejected an operation.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Failures raised while bulk-loading the CSV sources.
///
/// Any variant aborts the load before the store is touched; a partially
/// parsed file never reaches `replace_all`.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {file}: {source}")]
    Source {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed row at {file}:{line}: {message}")]
    MalformedRow {
        file: String,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
