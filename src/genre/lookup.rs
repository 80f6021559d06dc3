use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{LookupError, ParseOptionError};

use super::catalog::Genre;

/// What to do when a podcast references a genre id missing from the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnknownGenrePolicy {
    /// Fail the whole enrichment batch
    FailBatch,
    /// Leave the offending podcast out of the result
    SkipRecord,
    /// Drop the unknown id and keep the podcast with its known genres
    #[default]
    DropId,
}

impl UnknownGenrePolicy {
    const NAMES: &'static str = "fail-batch, skip-record, drop-id";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailBatch => "fail-batch",
            Self::SkipRecord => "skip-record",
            Self::DropId => "drop-id",
        }
    }
}

impl fmt::Display for UnknownGenrePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownGenrePolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-batch" => Ok(Self::FailBatch),
            "skip-record" => Ok(Self::SkipRecord),
            "drop-id" => Ok(Self::DropId),
            other => Err(ParseOptionError {
                kind: "unknown-genre policy",
                value: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Outcome of resolving one podcast's genre ids under a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Titles to attach, or `None` when the record should be skipped
    pub titles: Option<Vec<String>>,
    /// Ids that had no catalog entry, in input order
    pub missing: Vec<u32>,
}

/// Maps genre ids to genre titles, built once from a catalog
#[derive(Debug, Clone)]
pub struct GenreLookup {
    genres: Vec<Genre>,
    titles: HashMap<u32, String>,
}

impl GenreLookup {
    /// Build a lookup from a genre catalog.
    ///
    /// If the catalog repeats an id, the first entry wins.
    pub fn new(genres: &[Genre]) -> Self {
        let mut titles = HashMap::with_capacity(genres.len());
        for genre in genres {
            titles
                .entry(genre.id)
                .or_insert_with(|| genre.title.clone());
        }

        Self {
            genres: genres.to_vec(),
            titles,
        }
    }

    /// The catalog this lookup was built from, in catalog order
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Title for a single genre id
    pub fn title(&self, id: u32) -> Option<&str> {
        self.titles.get(&id).map(String::as_str)
    }

    /// Whether the catalog has a genre with this title (exact match)
    pub fn has_title(&self, title: &str) -> bool {
        self.genres.iter().any(|g| g.title == title)
    }

    /// Translate genre ids into titles, preserving order.
    ///
    /// Fails on the first id that is not in the catalog.
    pub fn titles_for(&self, ids: &[u32]) -> Result<Vec<String>, LookupError> {
        ids.iter()
            .map(|&id| {
                self.title(id)
                    .map(String::from)
                    .ok_or(LookupError::UnknownGenre { id })
            })
            .collect()
    }

    /// Translate genre ids into titles, handling unknown ids per `policy`
    pub fn resolve(
        &self,
        ids: &[u32],
        policy: UnknownGenrePolicy,
    ) -> Result<Resolution, LookupError> {
        let mut titles = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();

        for &id in ids {
            match self.title(id) {
                Some(title) => titles.push(title.to_string()),
                None if policy == UnknownGenrePolicy::FailBatch => {
                    return Err(LookupError::UnknownGenre { id });
                }
                None => missing.push(id),
            }
        }

        let titles = match policy {
            UnknownGenrePolicy::SkipRecord if !missing.is_empty() => None,
            _ => Some(titles),
        };

        Ok(Resolution { titles, missing })
    }
}
