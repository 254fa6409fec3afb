use crate::genres;
use crate::models::{Movie, TvShow};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Show,
}

/// A catalog entry of either kind, read through one set of accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Movie(Movie),
    Show(TvShow),
}

impl From<Movie> for Media {
    fn from(m: Movie) -> Self {
        Media::Movie(m)
    }
}

impl From<TvShow> for Media {
    fn from(s: TvShow) -> Self {
        Media::Show(s)
    }
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Movie(_) => MediaKind::Movie,
            Media::Show(_) => MediaKind::Show,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Media::Movie(m) => m.id,
            Media::Show(s) => s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Media::Movie(m) => &m.title,
            Media::Show(s) => &s.name,
        }
    }

    pub fn original_title(&self) -> &str {
        let text = match self {
            Media::Movie(m) => m.original_title.as_deref(),
            Media::Show(s) => s.original_name.as_deref(),
        };
        text.unwrap_or_default()
    }

    /// Release date for movies, first air date for shows. Blank strings count as missing.
    pub fn date(&self) -> Option<&str> {
        let raw = match self {
            Media::Movie(m) => m.release_date.as_deref(),
            Media::Show(s) => s.first_air_date.as_deref(),
        };
        raw.filter(|d| !d.trim().is_empty())
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    pub fn year(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y").to_string())
    }

    pub fn date_label(&self) -> &'static str {
        match self {
            Media::Movie(_) => "Release Date",
            Media::Show(_) => "First Air Date",
        }
    }

    pub fn genre_ids(&self) -> &[u32] {
        match self {
            Media::Movie(m) => &m.genre_ids,
            Media::Show(s) => &s.genre_ids,
        }
    }

    pub fn genre_names(&self) -> Vec<&'static str> {
        genres::genre_names(self.kind(), self.genre_ids())
    }

    pub fn overview(&self) -> &str {
        let text = match self {
            Media::Movie(m) => m.overview.as_deref(),
            Media::Show(s) => s.overview.as_deref(),
        };
        text.unwrap_or_default()
    }

    pub fn original_language(&self) -> &str {
        let text = match self {
            Media::Movie(m) => m.original_language.as_deref(),
            Media::Show(s) => s.original_language.as_deref(),
        };
        text.unwrap_or_default()
    }

    /// Always empty for movies.
    pub fn origin_countries(&self) -> &[String] {
        match self {
            Media::Movie(_) => &[],
            Media::Show(s) => &s.origin_country,
        }
    }

    pub fn vote_average(&self) -> f64 {
        match self {
            Media::Movie(m) => m.vote_average,
            Media::Show(s) => s.vote_average,
        }
    }

    pub fn vote_count(&self) -> u64 {
        match self {
            Media::Movie(m) => m.vote_count,
            Media::Show(s) => s.vote_count,
        }
    }

    pub fn popularity(&self) -> f64 {
        match self {
            Media::Movie(m) => m.popularity,
            Media::Show(s) => s.popularity,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            Media::Movie(m) => m.poster_path.as_deref(),
            Media::Show(s) => s.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            Media::Movie(m) => m.backdrop_path.as_deref(),
            Media::Show(s) => s.backdrop_path.as_deref(),
        }
    }
}
