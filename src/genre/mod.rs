mod catalog;
mod lookup;

pub use catalog::{Genre, bundled_genres};
pub use lookup::{GenreLookup, Resolution, UnknownGenrePolicy};
