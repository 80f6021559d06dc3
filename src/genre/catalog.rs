use serde::{Deserialize, Serialize};

/// A podcast genre from the static catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub title: String,
}

impl Genre {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Genre table served alongside the podcast API
const CATALOG: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

/// The genre catalog bundled with the application, in id order
pub fn bundled_genres() -> Vec<Genre> {
    CATALOG
        .iter()
        .map(|&(id, title)| Genre::new(id, title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_has_unique_ids_in_order() {
        let genres = bundled_genres();
        assert_eq!(genres.len(), 9);

        let ids: Vec<u32> = genres.iter().map(|g| g.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn bundled_catalog_contains_known_titles() {
        let genres = bundled_genres();
        assert!(genres.contains(&Genre::new(4, "Comedy")));
        assert!(genres.contains(&Genre::new(8, "News")));
    }
}
