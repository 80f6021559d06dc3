use std::cmp::{Ordering, Reverse};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::LookupError;
use crate::genre::{GenreLookup, UnknownGenrePolicy};
use crate::podcast::{EnrichedPodcast, RawPodcast};

use super::selection::{GenreFilter, Selection, SortOption};

/// Podcasts with resolved genre titles, plus any ids the catalog lacked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub podcasts: Vec<EnrichedPodcast>,
    /// `(podcast id, genre id)` pairs that could not be resolved
    pub unresolved: Vec<(String, u32)>,
}

/// Resolve every podcast's genre ids into titles.
///
/// Under `FailBatch` the first unknown id aborts the whole batch; the other
/// policies record unknown ids in `unresolved` and carry on.
pub fn enrich(
    raw: &[RawPodcast],
    lookup: &GenreLookup,
    policy: UnknownGenrePolicy,
) -> Result<Enrichment, LookupError> {
    let mut enrichment = Enrichment {
        podcasts: Vec::with_capacity(raw.len()),
        unresolved: Vec::new(),
    };

    for podcast in raw {
        let resolution = lookup.resolve(&podcast.genres, policy).map_err(|e| match e {
            LookupError::UnknownGenre { id } => LookupError::UnresolvedInPodcast {
                podcast_id: podcast.id.clone(),
                id,
            },
            other => other,
        })?;

        enrichment.unresolved.extend(
            resolution
                .missing
                .into_iter()
                .map(|id| (podcast.id.clone(), id)),
        );

        if let Some(titles) = resolution.titles {
            enrichment.podcasts.push(podcast.enrich(titles));
        }
    }

    Ok(enrichment)
}

/// Whether a podcast passes the genre filter (exact, case-sensitive title match)
pub fn matches_genre(podcast: &EnrichedPodcast, filter: &GenreFilter) -> bool {
    match filter {
        GenreFilter::All => true,
        GenreFilter::Title(title) => podcast.genres.iter().any(|g| g == title),
    }
}

/// Lowercased search needle; empty when the term is blank after trimming.
///
/// Only the emptiness check trims: a non-blank term is matched as typed.
fn search_needle(search_term: &str) -> String {
    if search_term.trim().is_empty() {
        String::new()
    } else {
        search_term.to_lowercase()
    }
}

/// Whether a podcast title contains `needle`, which must already be lowercased
fn title_contains(podcast: &EnrichedPodcast, needle: &str) -> bool {
    needle.is_empty() || podcast.title.to_lowercase().contains(needle)
}

/// Whether a podcast passes the search filter (case-insensitive substring of the title)
pub fn matches_search(podcast: &EnrichedPodcast, search_term: &str) -> bool {
    title_contains(podcast, &search_needle(search_term))
}

/// Sort key for alphabetical ordering.
///
/// The first part is the title decomposed (NFD) with combining marks
/// stripped and lowercased, so "Écoute" files under "e". The untouched
/// title breaks the remaining ties.
fn collation_key(title: &str) -> (String, String) {
    let folded: String = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    (folded, title.to_string())
}

/// Collation used for alphabetical sorting
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Sort podcasts in place. All orderings are stable.
///
/// For `Newest`, podcasts with unparsable timestamps go last in their
/// original relative order.
pub fn sort_podcasts(podcasts: &mut [EnrichedPodcast], sort: SortOption) {
    match sort {
        SortOption::Default => {}
        SortOption::Newest => podcasts.sort_by_cached_key(|p| Reverse(p.updated_at())),
        SortOption::Az => podcasts.sort_by_cached_key(|p| collation_key(&p.title)),
        SortOption::Za => podcasts.sort_by_cached_key(|p| Reverse(collation_key(&p.title))),
    }
}

/// Apply genre filter, search filter and sort to already-enriched podcasts
pub fn apply(enriched: &[EnrichedPodcast], selection: &Selection) -> Vec<EnrichedPodcast> {
    let needle = search_needle(&selection.search_term);

    let mut podcasts: Vec<EnrichedPodcast> = enriched
        .iter()
        .filter(|p| matches_genre(p, &selection.genre))
        .filter(|p| title_contains(p, &needle))
        .cloned()
        .collect();

    sort_podcasts(&mut podcasts, selection.sort);
    podcasts
}

/// Run the full pipeline: enrich, filter by genre, filter by search, sort
pub fn compute(
    raw: &[RawPodcast],
    lookup: &GenreLookup,
    selection: &Selection,
    policy: UnknownGenrePolicy,
) -> Result<Vec<EnrichedPodcast>, LookupError> {
    let enrichment = enrich(raw, lookup, policy)?;
    Ok(apply(&enrichment.podcasts, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::genre::Genre;

    fn raw(id: &str, title: &str, genres: &[u32], updated: &str) -> RawPodcast {
        RawPodcast {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            image: format!("https://example.com/{id}.jpg"),
            seasons: 1,
            genres: genres.to_vec(),
            updated: updated.to_string(),
        }
    }

    fn lookup() -> GenreLookup {
        GenreLookup::new(&[Genre::new(1, "Comedy"), Genre::new(2, "News")])
    }

    fn scenario() -> Vec<RawPodcast> {
        vec![
            raw("a", "Zebra Talk", &[1], "2023-01-01"),
            raw("b", "Alpha News", &[2], "2024-01-01"),
        ]
    }

    fn titles(podcasts: &[EnrichedPodcast]) -> Vec<&str> {
        podcasts.iter().map(|p| p.title.as_str()).collect()
    }

    fn selection(genre: &str, search: &str, sort: SortOption) -> Selection {
        Selection {
            genre: GenreFilter::from_selection(genre),
            search_term: search.to_string(),
            sort,
        }
    }

    fn run(raw: &[RawPodcast], selection: &Selection) -> Vec<EnrichedPodcast> {
        compute(raw, &lookup(), selection, UnknownGenrePolicy::DropId).unwrap()
    }

    #[test]
    fn scenario_sorts_newest_first() {
        let result = run(&scenario(), &selection("all-genres", "", SortOption::Newest));
        assert_eq!(titles(&result), vec!["Alpha News", "Zebra Talk"]);
    }

    #[test]
    fn scenario_sorts_alphabetically() {
        let az = run(&scenario(), &selection("all-genres", "", SortOption::Az));
        assert_eq!(titles(&az), vec!["Alpha News", "Zebra Talk"]);

        let za = run(&scenario(), &selection("all-genres", "", SortOption::Za));
        assert_eq!(titles(&za), vec!["Zebra Talk", "Alpha News"]);
    }

    #[test]
    fn scenario_filters_by_genre_title() {
        let result = run(&scenario(), &selection("Comedy", "", SortOption::Default));
        assert_eq!(titles(&result), vec!["Zebra Talk"]);
    }

    #[test]
    fn scenario_search_is_case_insensitive() {
        let result = run(&scenario(), &selection("all-genres", "news", SortOption::Default));
        assert_eq!(titles(&result), vec!["Alpha News"]);
    }

    #[test]
    fn enrichment_replaces_ids_with_titles() {
        let result = run(&scenario(), &Selection::default());
        assert_eq!(result[0].genres, vec!["Comedy"]);
        assert_eq!(result[1].genres, vec!["News"]);
    }

    #[test]
    fn all_genres_with_default_sort_is_identity() {
        let raw = vec![
            raw("1", "Middle", &[1, 2], "2022-05-01"),
            raw("2", "Beta", &[2], "2021-01-01"),
            raw("3", "Alpha", &[1], "2024-01-01"),
        ];

        let result = run(&raw, &Selection::default());
        assert_eq!(titles(&result), vec!["Middle", "Beta", "Alpha"]);
    }

    #[test]
    fn genre_filter_is_case_sensitive() {
        let result = run(&scenario(), &selection("comedy", "", SortOption::Default));
        assert!(result.is_empty());
    }

    #[test]
    fn genre_filter_matches_any_position() {
        let raw = vec![
            raw("1", "Both", &[1, 2], "2022-05-01"),
            raw("2", "Only Comedy", &[1], "2021-01-01"),
        ];

        let result = run(&raw, &selection("News", "", SortOption::Default));
        assert_eq!(titles(&result), vec!["Both"]);
    }

    #[test]
    fn search_includes_matches_and_excludes_the_rest() {
        let raw = vec![
            raw("1", "The Daily", &[2], "2024-01-01"),
            raw("2", "Daily Comedy Hour", &[1], "2023-01-01"),
            raw("3", "Weekly Roundup", &[2], "2022-01-01"),
        ];
        let term = "DAILY";

        let result = run(&raw, &selection("all-genres", term, SortOption::Default));

        for podcast in &result {
            assert!(podcast.title.to_lowercase().contains(&term.to_lowercase()));
        }
        for podcast in raw.iter().filter(|p| !result.iter().any(|r| r.id == p.id)) {
            assert!(!podcast.title.to_lowercase().contains(&term.to_lowercase()));
        }
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn matches_search_checks_single_podcast() {
        let enriched = enrich(&scenario(), &lookup(), UnknownGenrePolicy::DropId)
            .unwrap()
            .podcasts;

        assert!(matches_search(&enriched[0], "TALK"));
        assert!(matches_search(&enriched[0], ""));
        assert!(!matches_search(&enriched[0], "news"));
    }

    #[test]
    fn whitespace_only_search_is_ignored() {
        let result = run(&scenario(), &selection("all-genres", "   ", SortOption::Default));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn padded_search_term_is_matched_as_typed() {
        let raw = vec![
            raw("1", "Zebra Talk", &[1], "2023-01-01"),
            raw("2", "Talk Show Tonight", &[1], "2023-01-01"),
        ];
        let term = "talk ";

        let result = run(&raw, &selection("all-genres", term, SortOption::Default));

        for podcast in &result {
            assert!(podcast.title.to_lowercase().contains(term));
        }
        assert_eq!(titles(&result), vec!["Talk Show Tonight"]);
    }

    #[test]
    fn az_folds_accents_into_base_letters() {
        let raw = vec![
            raw("1", "Zoo Radio", &[1], "2023-01-01"),
            raw("2", "Écoute", &[1], "2023-01-01"),
            raw("3", "Mango", &[1], "2023-01-01"),
        ];

        let az = run(&raw, &selection("all-genres", "", SortOption::Az));
        assert_eq!(titles(&az), vec!["Écoute", "Mango", "Zoo Radio"]);

        let za = run(&raw, &selection("all-genres", "", SortOption::Za));
        assert_eq!(titles(&za), vec!["Zoo Radio", "Mango", "Écoute"]);
    }

    #[test]
    fn az_and_za_are_exact_reverses_without_ties() {
        let raw = vec![
            raw("1", "mango", &[1], "2022-01-01"),
            raw("2", "Apple", &[1], "2022-01-01"),
            raw("3", "banana", &[2], "2022-01-01"),
            raw("4", "Cherry", &[2], "2022-01-01"),
        ];

        let az = run(&raw, &selection("all-genres", "", SortOption::Az));
        let mut za = run(&raw, &selection("all-genres", "", SortOption::Za));
        za.reverse();

        assert_eq!(titles(&az), vec!["Apple", "banana", "Cherry", "mango"]);
        assert_eq!(az, za);
    }

    #[test]
    fn newest_is_stable_for_ties_and_puts_bad_dates_last() {
        let raw = vec![
            raw("1", "Broken A", &[1], "not a date"),
            raw("2", "Tie First", &[1], "2023-03-01T00:00:00Z"),
            raw("3", "Latest", &[1], "2024-06-01T12:00:00.000Z"),
            raw("4", "Tie Second", &[1], "2023-03-01"),
            raw("5", "Broken B", &[1], ""),
        ];

        let result = run(&raw, &selection("all-genres", "", SortOption::Newest));
        assert_eq!(
            titles(&result),
            vec!["Latest", "Tie First", "Tie Second", "Broken A", "Broken B"]
        );
    }

    #[test]
    fn filters_then_sorts() {
        let raw = vec![
            raw("1", "Zulu News", &[2], "2020-01-01"),
            raw("2", "Comedy Gold", &[1], "2024-01-01"),
            raw("3", "Alpha News", &[2], "2021-01-01"),
        ];

        let result = run(&raw, &selection("News", "news", SortOption::Az));
        assert_eq!(titles(&result), vec!["Alpha News", "Zulu News"]);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = run(&[], &selection("Comedy", "x", SortOption::Newest));
        assert!(result.is_empty());
    }

    #[test]
    fn compute_does_not_mutate_input() {
        let raw = scenario();
        let before = raw.clone();
        let _ = run(&raw, &selection("all-genres", "", SortOption::Az));
        assert_eq!(raw, before);
    }

    #[test]
    fn enrich_records_unresolved_ids_under_drop_id() {
        let raw = vec![raw("x", "Mystery", &[1, 99], "2023-01-01")];

        let enrichment = enrich(&raw, &lookup(), UnknownGenrePolicy::DropId).unwrap();

        assert_eq!(enrichment.podcasts.len(), 1);
        assert_eq!(enrichment.podcasts[0].genres, vec!["Comedy"]);
        assert_eq!(enrichment.unresolved, vec![("x".to_string(), 99)]);
    }

    #[test]
    fn enrich_skips_record_under_skip_record() {
        let raw = vec![
            raw("x", "Mystery", &[1, 99], "2023-01-01"),
            raw("y", "Known", &[2], "2023-01-01"),
        ];

        let enrichment = enrich(&raw, &lookup(), UnknownGenrePolicy::SkipRecord).unwrap();

        assert_eq!(titles(&enrichment.podcasts), vec!["Known"]);
        assert_eq!(enrichment.unresolved, vec![("x".to_string(), 99)]);
    }

    #[test]
    fn enrich_fails_batch_with_podcast_context() {
        let raw = vec![
            raw("y", "Known", &[2], "2023-01-01"),
            raw("x", "Mystery", &[99], "2023-01-01"),
        ];

        let result = enrich(&raw, &lookup(), UnknownGenrePolicy::FailBatch);

        assert_eq!(
            result,
            Err(LookupError::UnresolvedInPodcast {
                podcast_id: "x".to_string(),
                id: 99
            })
        );
    }

    #[test]
    fn compare_titles_orders_case_insensitively() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Apple", "apple"), Ordering::Less);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
        assert_eq!(compare_titles("Élan", "Fable"), Ordering::Less);
    }
}
