use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when retrieving the podcast catalog
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch podcasts from {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read podcast file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode podcast list: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Fetch cancelled")]
    Cancelled,
}

/// Errors that can occur when resolving genre ids against the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown genre id {id}")]
    UnknownGenre { id: u32 },

    #[error("Podcast '{podcast_id}' references unknown genre id {id}")]
    UnresolvedInPodcast { podcast_id: String, id: u32 },
}

/// Error returned when a selection or policy name cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Top-level errors surfaced by the podcast store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Data integrity error: {0}")]
    Lookup(#[from] LookupError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_messages_are_human_readable() {
        let err = StoreError::from(FetchError::HttpStatus {
            url: "https://example.com/".to_string(),
            status: 503,
        });
        assert_eq!(err.to_string(), "HTTP error 503 for https://example.com/");

        let err = StoreError::from(LookupError::UnresolvedInPodcast {
            podcast_id: "10716".to_string(),
            id: 42,
        });
        assert_eq!(
            err.to_string(),
            "Data integrity error: Podcast '10716' references unknown genre id 42"
        );
    }
}
