use thiserror::Error;

/// Failures while fetching or aggregating the hospital feed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("cannot read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV record")]
    Csv(#[from] csv::Error),
    #[error("invalid date {value:?} (expected {format})")]
    Date {
        value: String,
        format: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("feed contains no combined-sex rows")]
    Empty,
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
