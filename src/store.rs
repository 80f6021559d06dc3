// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{FetchError, StoreError};
use crate::genre::{Genre, GenreLookup, UnknownGenrePolicy};
use crate::http::HttpClient;
use crate::pagination::{DEFAULT_PAGE_SIZE, Page, Paginator};
use crate::pipeline::{self, GenreFilter, PipelineCache, PipelineKey, Selection, SortOption};
use crate::podcast::{DEFAULT_ENDPOINT, EnrichedPodcast, FetchState, RawPodcast, fetch_podcasts};
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Options for the podcast store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Catalog URL or path to a local JSON file
    pub source: String,
    /// Podcasts revealed per "load more" step
    pub page_size: usize,
    /// How to treat genre ids missing from the catalog
    pub unknown_genre_policy: UnknownGenrePolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            source: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            unknown_genre_policy: UnknownGenrePolicy::default(),
        }
    }
}

/// Single source of truth for fetched podcasts, the user's selection and
/// the paginated view derived from them.
///
/// Presentation code holds the store by reference. Selection only changes
/// through the setters, each of which recomputes the pipeline and returns
/// the window to page 1.
pub struct PodcastStore {
    options: StoreOptions,
    lookup: GenreLookup,
    fetch: FetchState,
    enriched: Vec<EnrichedPodcast>,
    generation: u64,
    selection: Selection,
    cache: PipelineCache,
    paginator: Paginator,
    reporter: SharedProgressReporter,
}

impl PodcastStore {
    /// Create a store in the loading state
    pub fn new(genres: &[Genre], options: StoreOptions, reporter: SharedProgressReporter) -> Self {
        let paginator = Paginator::new(options.page_size);
        let mut store = Self {
            options,
            lookup: GenreLookup::new(genres),
            fetch: FetchState::Loading,
            enriched: Vec::new(),
            generation: 0,
            selection: Selection::default(),
            cache: PipelineCache::new(),
            paginator,
            reporter,
        };
        store.recompute();
        store
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Fetch the podcast list from the configured source.
    ///
    /// The outcome is recorded in the store either way; the returned error
    /// mirrors what `error()` will show.
    pub async fn load<C: HttpClient + ?Sized>(
        &mut self,
        client: &C,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        self.fetch = FetchState::Loading;
        self.reporter.report(ProgressEvent::FetchStarted {
            source: self.options.source.clone(),
        });
        info!(source = %self.options.source, "fetching podcasts");

        match fetch_podcasts(client, &self.options.source, cancel).await {
            Ok(raw) => {
                self.reporter.report(ProgressEvent::FetchCompleted {
                    podcast_count: raw.len(),
                });
                self.set_podcasts(raw)
            }
            Err(e) => {
                if matches!(e, FetchError::Cancelled) {
                    self.reporter.report(ProgressEvent::FetchCancelled);
                }
                let err = StoreError::from(e);
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Replace the raw data set, enriching it with genre titles.
    ///
    /// The pagination window is kept; only selection changes reset it.
    pub fn set_podcasts(&mut self, raw: Vec<RawPodcast>) -> Result<(), StoreError> {
        match pipeline::enrich(&raw, &self.lookup, self.options.unknown_genre_policy) {
            Ok(enrichment) => {
                for (podcast_id, genre_id) in enrichment.unresolved {
                    self.reporter.report(ProgressEvent::GenreUnresolved {
                        podcast_id,
                        genre_id,
                    });
                }
                self.enriched = enrichment.podcasts;
                self.fetch = FetchState::Loaded {
                    podcast_count: raw.len(),
                };
                self.generation += 1;
                self.recompute();
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn fail(&mut self, err: &StoreError) {
        let message = err.to_string();
        self.reporter.report(ProgressEvent::FetchFailed {
            error: message.clone(),
        });
        self.fetch = FetchState::Failed(message);
        self.enriched.clear();
        self.generation += 1;
        self.recompute();
    }

    fn recompute(&mut self) {
        let key = PipelineKey {
            generation: self.generation,
            selection: self.selection.clone(),
        };
        let enriched = &self.enriched;
        let selection = &self.selection;

        if self
            .cache
            .refresh(key, || pipeline::apply(enriched, selection))
        {
            let result_count = self.cache.current().len();
            debug!(
                result_count,
                total_count = self.enriched.len(),
                "pipeline recomputed"
            );
            self.reporter.report(ProgressEvent::PipelineRecomputed {
                result_count,
                total_count: self.enriched.len(),
            });
        }
    }

    fn selection_changed(&mut self) {
        self.recompute();
        self.paginator.reset();
    }

    /// Select a genre by title, or `all-genres` to clear the filter
    pub fn set_selected_genre(&mut self, genre: impl Into<GenreFilter>) {
        let genre = genre.into();
        if self.selection.genre != genre {
            self.selection.genre = genre;
            self.selection_changed();
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.selection.search_term != term {
            self.selection.search_term = term;
            self.selection_changed();
        }
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        if self.selection.sort != sort {
            self.selection.sort = sort;
            self.selection_changed();
        }
    }

    /// Reveal the next page if one remains. Returns whether the window grew.
    pub fn load_more(&mut self) -> bool {
        self.paginator.load_more(self.cache.current().len())
    }

    pub fn loading(&self) -> bool {
        self.fetch.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.fetch.error()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Enriched, filtered and sorted podcasts
    pub fn podcasts(&self) -> &[EnrichedPodcast] {
        self.cache.current()
    }

    /// Number of enriched podcasts before any filtering
    pub fn total_count(&self) -> usize {
        self.enriched.len()
    }

    pub fn genres(&self) -> &[Genre] {
        self.lookup.genres()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_genre(&self) -> &GenreFilter {
        &self.selection.genre
    }

    pub fn search_term(&self) -> &str {
        &self.selection.search_term
    }

    pub fn sort_option(&self) -> SortOption {
        self.selection.sort
    }

    pub fn page(&self) -> Page<'_, EnrichedPodcast> {
        self.paginator.page(self.cache.current())
    }

    pub fn visible_podcasts(&self) -> &[EnrichedPodcast] {
        self.page().visible
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.page().total_pages
    }

    pub fn has_more(&self) -> bool {
        self.page().has_more
    }

    /// How many times the pipeline has actually run
    pub fn computations(&self) -> usize {
        self.cache.computations()
    }
}
