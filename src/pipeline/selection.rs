use std::fmt;
use std::str::FromStr;

use crate::error::ParseOptionError;

/// Genre selection value meaning "do not filter by genre"
pub const ALL_GENRES: &str = "all-genres";

/// Genre filter chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    /// Keep podcasts tagged with this exact genre title
    Title(String),
}

impl GenreFilter {
    /// Interpret a dropdown value, where `all-genres` disables the filter
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_GENRES {
            Self::All
        } else {
            Self::Title(value.to_string())
        }
    }

    /// The dropdown value for this filter
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_GENRES,
            Self::Title(title) => title,
        }
    }
}

impl From<&str> for GenreFilter {
    fn from(value: &str) -> Self {
        Self::from_selection(value)
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to the filtered podcasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Keep fetch order
    #[default]
    Default,
    /// Most recently updated first
    Newest,
    /// Title A to Z
    Az,
    /// Title Z to A
    Za,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [Self::Default, Self::Newest, Self::Az, Self::Za];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Newest => "newest",
            Self::Az => "az",
            Self::Za => "za",
        }
    }

    /// Human-readable label for menus
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Newest => "Most Recent",
            Self::Az => "A-Z",
            Self::Za => "Z-A",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| ParseOptionError {
                kind: "sort option",
                value: s.to_string(),
                expected: "default, newest, az, za",
            })
    }
}

/// The three user-controlled pipeline inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub genre: GenreFilter,
    pub search_term: String,
    pub sort: SortOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_all() {
        assert_eq!(GenreFilter::from_selection("all-genres"), GenreFilter::All);
        assert_eq!(GenreFilter::All.as_str(), ALL_GENRES);
        assert_eq!(
            GenreFilter::from("Comedy"),
            GenreFilter::Title("Comedy".to_string())
        );
    }

    #[test]
    fn sort_option_parses_every_name() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
        }
    }

    #[test]
    fn sort_option_rejects_unknown_names() {
        let err = "popular".parse::<SortOption>().unwrap_err();
        assert_eq!(err.kind, "sort option");
        assert_eq!(err.value, "popular");
    }

    #[test]
    fn default_selection_is_unfiltered() {
        let selection = Selection::default();
        assert_eq!(selection.genre, GenreFilter::All);
        assert!(selection.search_term.is_empty());
        assert_eq!(selection.sort, SortOption::Default);
    }
}
