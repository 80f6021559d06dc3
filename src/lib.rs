pub mod error;
pub mod genre;
pub mod http;
pub mod pagination;
pub mod pipeline;
pub mod podcast;
pub mod progress;
pub mod store;

// Re-export main types for convenience
pub use error::{FetchError, LookupError, ParseOptionError, StoreError};
pub use genre::{Genre, GenreLookup, UnknownGenrePolicy, bundled_genres};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, Paginator, paginate};
pub use pipeline::{ALL_GENRES, GenreFilter, Selection, SortOption, compute};
pub use podcast::{DEFAULT_ENDPOINT, EnrichedPodcast, FetchState, RawPodcast, fetch_podcasts};
pub use progress::{
    NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter, TracingReporter,
};
pub use store::{PodcastStore, StoreOptions};
