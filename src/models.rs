use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie as TMDB lists it. Fields the dashboard never reads are kept in
/// `extra` so the record serializes back the way upstream sent it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of an upstream listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub total_results: u64,
}

/// Body of the discover and search routes. Both keys are always serialized.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MediaCollections {
    pub movies: Vec<Movie>,
    pub shows: Vec<TvShow>,
}

impl MediaCollections {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_movie_fields_survive_a_round_trip() {
        let upstream = json!({
            "id": 603,
            "title": "The Matrix",
            "original_title": "The Matrix",
            "overview": "Wake up",
            "release_date": "1999-03-30",
            "genre_ids": [28, 878],
            "popularity": 80.5,
            "vote_average": 8.2,
            "vote_count": 25000,
            "poster_path": "/matrix.jpg",
            "backdrop_path": null,
            "original_language": "en",
            "adult": false,
            "video": false
        });
        let movie: Movie = serde_json::from_value(upstream.clone()).unwrap();
        assert_eq!(movie.extra.get("video"), Some(&json!(false)));
        assert_eq!(serde_json::to_value(&movie).unwrap(), upstream);
    }

    #[test]
    fn null_text_fields_do_not_fail_the_page() {
        let page: Paged<TvShow> = serde_json::from_value(json!({
            "page": 1,
            "results": [
                {
                    "id": 1, "name": "Untitled", "original_name": null,
                    "overview": null, "original_language": null,
                    "first_air_date": null, "poster_path": null, "backdrop_path": null
                },
                { "id": 2, "name": "Titled", "overview": "Has one" }
            ],
            "total_pages": 1,
            "total_results": 2
        }))
        .unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].overview, None);
        assert_eq!(page.results[1].overview.as_deref(), Some("Has one"));
        let back = serde_json::to_value(&page.results[0]).unwrap();
        assert_eq!(back["overview"], Value::Null);
    }
}
