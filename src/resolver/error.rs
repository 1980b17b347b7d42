use hyper::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why a lookup did not produce a [LocationRecord](super::LocationRecord).
///
/// The `Display` output is what ends up in the error modal.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("API Error: {} - {body}", .status.as_u16())]
    NetworkError { status: StatusCode, body: String },
    #[error("API Response Error: {raw_text}")]
    ParseError { raw_text: String },
    #[error("{reason}")]
    ApiError { reason: String },
    #[error("Lookup request failed: {0}")]
    Transport(#[from] hyper::Error),
    #[error(r#"Cannot build a lookup request for "{query}""#)]
    InvalidQuery { query: String },
    #[error("Lookup timed out after {0:?}")]
    TimedOut(Duration),
}

impl ResolutionError {
    pub(crate) fn invalid_query(query: &str) -> Self {
        Self::InvalidQuery {
            query: query.to_owned(),
        }
    }
}
