use thiserror::Error;

/// Failures at the edges of the app: session storage and export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("session database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
