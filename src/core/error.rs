use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IpoError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A response or stored calendar could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error while reading or writing the persisted calendar.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data received was in an unexpected format or was missing a required structure.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A raw record is missing a mandatory identity field (`ticker` or `company`).
    ///
    /// The batch pipeline skips and logs these rather than aborting.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Two records with contradictory identity fields were asked to merge.
    ///
    /// The calendar-level merge keeps the previously persisted record when this occurs.
    #[error("merge conflict for ticker {ticker}")]
    MergeConflict {
        /// The ticker of the record that failed to merge.
        ticker: String,
    },
}
