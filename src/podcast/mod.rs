mod fetch;
mod model;

pub use fetch::{
    DEFAULT_ENDPOINT, FetchState, decode_podcasts, fetch_podcast_bytes, fetch_podcasts, is_url,
    read_podcast_file,
};
pub use model::{EnrichedPodcast, RawPodcast, parse_timestamp};
