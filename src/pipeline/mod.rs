mod compute;
mod memo;
mod selection;

pub use compute::{
    Enrichment, apply, compare_titles, compute, enrich, matches_genre, matches_search,
    sort_podcasts,
};
pub use memo::{PipelineCache, PipelineKey};
pub use selection::{ALL_GENRES, GenreFilter, Selection, SortOption};
