//! TMDB genre ids and their display names.
use crate::media::MediaKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const UNKNOWN_GENRE: &str = "Unknown";

static MOVIE_GENRES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ])
});

static TV_GENRES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (10759, "Action & Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (10762, "Kids"),
        (9648, "Mystery"),
        (10763, "News"),
        (10764, "Reality"),
        (10765, "Sci-Fi & Fantasy"),
        (10766, "Soap"),
        (10767, "Talk"),
        (10768, "War & Politics"),
        (37, "Western"),
    ])
});

fn table(kind: MediaKind) -> &'static HashMap<u32, &'static str> {
    match kind {
        MediaKind::Movie => &MOVIE_GENRES,
        MediaKind::Show => &TV_GENRES,
    }
}

/// Display name for a genre id, or [`UNKNOWN_GENRE`] when the id is not mapped.
pub fn genre_name(kind: MediaKind, id: u32) -> &'static str {
    table(kind).get(&id).copied().unwrap_or(UNKNOWN_GENRE)
}

pub fn genre_names(kind: MediaKind, ids: &[u32]) -> Vec<&'static str> {
    ids.iter().map(|id| genre_name(kind, *id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_ids_per_kind() {
        assert_eq!(genre_name(MediaKind::Movie, 878), "Science Fiction");
        assert_eq!(genre_name(MediaKind::Show, 10765), "Sci-Fi & Fantasy");
        assert_eq!(genre_name(MediaKind::Movie, 18), "Drama");
        assert_eq!(genre_name(MediaKind::Show, 18), "Drama");
    }

    #[test]
    fn unknown_ids_fall_back() {
        assert_eq!(genre_name(MediaKind::Movie, 424242), "Unknown");
        // Movie-only id looked up in the TV table
        assert_eq!(genre_name(MediaKind::Show, 28), "Unknown");
        assert_eq!(
            genre_names(MediaKind::Movie, &[28, 1]),
            vec!["Action", "Unknown"]
        );
    }
}
