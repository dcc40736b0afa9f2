use std::time::Duration;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Generation API did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Failed to reach generation API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Failed to process generation API response: {0}")]
    ResponseParse(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
