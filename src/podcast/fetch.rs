// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;

use super::model::RawPodcast;

/// Catalog endpoint serving the full podcast preview list
pub const DEFAULT_ENDPOINT: &str = "https://podcast-api.netlify.app/";

/// Outcome of the one-shot podcast retrieval
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Request outstanding
    #[default]
    Loading,
    /// Podcasts arrived and were decoded
    Loaded { podcast_count: usize },
    /// Retrieval failed with a human-readable message
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Fetch raw response bytes from a URL, rejecting non-2xx responses
pub async fn fetch_podcast_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<Bytes, FetchError> {
    let response = client
        .get(url)
        .await
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Read a podcast list from a local JSON file
pub async fn read_podcast_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| FetchError::FileReadFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Decode a JSON array of podcast previews
pub fn decode_podcasts(bytes: &[u8]) -> Result<Vec<RawPodcast>, FetchError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Determine if a source string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Retrieve and decode the podcast list from a URL or local file.
///
/// Performs exactly one retrieval. If `cancel` fires first, the in-flight
/// request is dropped and `FetchError::Cancelled` is returned.
pub async fn fetch_podcasts<C: HttpClient + ?Sized>(
    client: &C,
    source: &str,
    cancel: &CancellationToken,
) -> Result<Vec<RawPodcast>, FetchError> {
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled);
    }

    let retrieval = async {
        let bytes = if is_url(source) {
            Url::parse(source)?;
            fetch_podcast_bytes(client, source).await?.to_vec()
        } else {
            read_podcast_file(Path::new(source)).await?
        };
        decode_podcasts(&bytes)
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        result = retrieval => result,
    }
}
