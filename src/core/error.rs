use reqwest::StatusCode;
use thiserror::Error;

/// Failures a rate provider can report.
#[derive(Debug, Error)]
pub enum RateError {
    /// The request never produced a response. The transport error is kept
    /// as the source.
    #[error("can't perform get request")]
    ServiceUnavailable(#[source] reqwest::Error),

    /// The provider answered with a status other than 200.
    #[error("bad response from the service: {0}")]
    BadResponse(StatusCode),

    /// The body could not be decoded into the expected shape.
    #[error("can't unmarshall incoming JSON: {0}")]
    InvalidResponse(String),
}
