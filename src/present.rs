//! View models for the dashboard: cards, carousel sections and the detail dialog.
use crate::media::{Media, MediaKind};
use serde::Serialize;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    Poster,
    Original,
}

pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let size = match size {
        ImageSize::Poster => "w500",
        ImageSize::Original => "original",
    };
    Some(format!("{IMAGE_BASE}/{size}{path}"))
}

pub fn rating_badge(vote_average: f64) -> String {
    format!("{:.1} ★", vote_average)
}

/// `Jul 16, 2008`, or a placeholder when the date is missing or unparsable.
pub fn short_date(media: &Media) -> String {
    match (media.date(), media.parsed_date()) {
        (None, _) => "Unknown date".to_string(),
        (Some(_), None) => "Invalid date".to_string(),
        (Some(_), Some(d)) => d.format("%b %-d, %Y").to_string(),
    }
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub rating: String,
    pub poster_url: Option<String>,
}

impl From<&Media> for Card {
    fn from(media: &Media) -> Self {
        Card {
            id: media.id(),
            title: media.title().to_string(),
            date: short_date(media),
            rating: rating_badge(media.vote_average()),
            poster_url: image_url(media.poster_path(), ImageSize::Poster),
        }
    }
}

/// A titled carousel of cards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section {
    pub heading: &'static str,
    pub cards: Vec<Card>,
}

impl Section {
    /// `None` when there is nothing to show, so the page can skip the carousel.
    pub fn build(kind: MediaKind, items: &[Media], searching: bool) -> Option<Section> {
        if items.is_empty() {
            return None;
        }
        let heading = match (kind, searching) {
            (MediaKind::Movie, false) => "Movies",
            (MediaKind::Movie, true) => "Movies Results",
            (MediaKind::Show, false) => "TV Shows",
            (MediaKind::Show, true) => "TV Shows Results",
        };
        Some(Section {
            heading,
            cards: items.iter().map(Card::from).collect(),
        })
    }
}

pub fn page_heading<'a>(default_title: &'a str, query: &str) -> &'a str {
    if query.is_empty() {
        default_title
    } else {
        "Search Results"
    }
}

pub fn no_results_message(query: &str, nothing_to_show: bool) -> Option<String> {
    if query.is_empty() || !nothing_to_show {
        return None;
    }
    Some(format!("No results found for \"{}\"", query))
}

/// Everything the detail dialog shows for one selected item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub original_title: String,
    pub backdrop_url: Option<String>,
    pub rating: String,
    pub year: Option<String>,
    pub language: String,
    pub origin_countries: Option<String>,
    pub genres: Vec<&'static str>,
    pub date_label: &'static str,
    pub date: Option<String>,
    pub vote_count: String,
    pub popularity: String,
    pub synopsis: String,
}

impl From<&Media> for DetailView {
    fn from(media: &Media) -> Self {
        let countries = media.origin_countries();
        DetailView {
            title: media.title().to_string(),
            original_title: media.original_title().to_string(),
            backdrop_url: image_url(media.backdrop_path(), ImageSize::Original),
            rating: rating_badge(media.vote_average()),
            year: media.year(),
            language: media.original_language().to_uppercase(),
            origin_countries: (!countries.is_empty()).then(|| countries.join(", ")),
            genres: media.genre_names(),
            date_label: media.date_label(),
            date: media.parsed_date().map(|d| d.format("%b %-d, %Y").to_string()),
            vote_count: group_thousands(media.vote_count()),
            popularity: format!("{:.0}", media.popularity()),
            synopsis: media.overview().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::{movie, show};

    #[test]
    fn card_projects_movie_fields() {
        let media: Media = movie(155, "The Dark Knight").into();
        let card = Card::from(&media);
        assert_eq!(card.title, "The Dark Knight");
        assert_eq!(card.date, "Jul 16, 2008");
        assert_eq!(card.rating, "8.5 ★");
        assert_eq!(
            card.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }

    #[test]
    fn card_handles_missing_and_broken_dates() {
        let mut raw = movie(1, "x");
        raw.release_date = None;
        raw.poster_path = None;
        let card = Card::from(&Media::from(raw.clone()));
        assert_eq!(card.date, "Unknown date");
        assert_eq!(card.poster_url, None);

        raw.release_date = Some("2024-13-45".to_string());
        assert_eq!(Card::from(&Media::from(raw)).date, "Invalid date");
    }

    #[test]
    fn detail_view_branches_on_kind() {
        let show: Media = show(1399, "The Mandalorian").into();
        let detail = DetailView::from(&show);
        assert_eq!(detail.date_label, "First Air Date");
        assert_eq!(detail.date.as_deref(), Some("Nov 12, 2019"));
        assert_eq!(detail.year.as_deref(), Some("2019"));
        assert_eq!(detail.origin_countries.as_deref(), Some("US, GB"));
        assert_eq!(detail.genres, vec!["Sci-Fi & Fantasy", "Action & Adventure"]);
        assert_eq!(detail.backdrop_url, None);
        assert_eq!(detail.language, "EN");
        assert_eq!(detail.original_title, "The Mandalorian (original)");

        let film: Media = movie(155, "The Dark Knight").into();
        let detail = DetailView::from(&film);
        assert_eq!(detail.date_label, "Release Date");
        assert_eq!(detail.origin_countries, None);
        assert_eq!(detail.vote_count, "32,104");
        assert_eq!(detail.popularity, "123");
        assert_eq!(
            detail.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn headings_follow_the_query() {
        let items: Vec<Media> = vec![movie(1, "a").into()];
        assert_eq!(
            Section::build(MediaKind::Movie, &items, false).map(|s| s.heading),
            Some("Movies")
        );
        assert_eq!(
            Section::build(MediaKind::Show, &items, true).map(|s| s.heading),
            Some("TV Shows Results")
        );
        assert!(Section::build(MediaKind::Movie, &[], true).is_none());

        assert_eq!(page_heading("Discover", ""), "Discover");
        assert_eq!(page_heading("Discover", "batman"), "Search Results");
        assert_eq!(
            no_results_message("batman", true).as_deref(),
            Some("No results found for \"batman\"")
        );
        assert_eq!(no_results_message("", true), None);
        assert_eq!(no_results_message("batman", false), None);
    }
}
