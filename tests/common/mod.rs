#![allow(dead_code)]

use axum::Router;
use cinetica::app::{build_router, AppState};
use cinetica::auth::StaticCredential;
use cinetica::models::{Movie, Paged, TvShow};
use cinetica::tmdb::CatalogApi;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const USERNAME: &str = "cinephile";
pub const PASSWORD: &str = "popcorn-42";

#[derive(Default)]
pub struct FakeCatalog {
    pub movies: Vec<Movie>,
    pub shows: Vec<TvShow>,
    pub fail_movies: bool,
    pub fail_shows: bool,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_library() -> Self {
        FakeCatalog {
            movies: vec![
                movie(268, "Batman"),
                movie(155, "The Dark Knight"),
                movie(603, "The Matrix"),
            ],
            shows: vec![show(2098, "Batman: The Animated Series"), show(1399, "Game of Thrones")],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn paged<T>(results: Vec<T>) -> Paged<T> {
    Paged {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u64,
        results,
    }
}

fn matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

#[async_trait::async_trait]
impl CatalogApi for FakeCatalog {
    async fn discover_movies(&self) -> anyhow::Result<Paged<Movie>> {
        self.hit();
        if self.fail_movies {
            anyhow::bail!("upstream 503 for discover/movie");
        }
        Ok(paged(self.movies.clone()))
    }

    async fn discover_shows(&self) -> anyhow::Result<Paged<TvShow>> {
        self.hit();
        if self.fail_shows {
            anyhow::bail!("upstream 503 for discover/tv");
        }
        Ok(paged(self.shows.clone()))
    }

    async fn search_movies(&self, query: &str) -> anyhow::Result<Paged<Movie>> {
        self.hit();
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_movies {
            anyhow::bail!("upstream 503 for search/movie");
        }
        Ok(paged(
            self.movies
                .iter()
                .filter(|m| matches(&m.title, query))
                .cloned()
                .collect(),
        ))
    }

    async fn search_shows(&self, query: &str) -> anyhow::Result<Paged<TvShow>> {
        self.hit();
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_shows {
            anyhow::bail!("upstream 503 for search/tv");
        }
        Ok(paged(
            self.shows
                .iter()
                .filter(|s| matches(&s.name, query))
                .cloned()
                .collect(),
        ))
    }

    async fn popular_movies(&self) -> anyhow::Result<Value> {
        self.hit();
        if self.fail_movies {
            anyhow::bail!("upstream 401");
        }
        Ok(json!({
            "page": 1,
            "results": self.movies,
            "total_pages": 500,
            "total_results": 10000
        }))
    }

    async fn popular_shows(&self) -> anyhow::Result<Value> {
        self.hit();
        if self.fail_shows {
            anyhow::bail!("upstream 401");
        }
        Ok(json!({
            "page": 1,
            "results": self.shows,
            "total_pages": 500,
            "total_results": 10000
        }))
    }

    async fn on_the_air_shows(&self) -> anyhow::Result<Value> {
        self.popular_shows().await
    }
}

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_title: Some(title.to_string()),
        overview: Some(format!("{title} overview")),
        release_date: Some("2008-07-16".to_string()),
        genre_ids: vec![28, 80],
        popularity: 90.5,
        vote_average: 8.4,
        vote_count: 30000,
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: None,
        original_language: Some("en".to_string()),
        adult: Some(false),
        extra: Default::default(),
    }
}

pub fn show(id: u64, name: &str) -> TvShow {
    TvShow {
        id,
        name: name.to_string(),
        original_name: Some(name.to_string()),
        first_air_date: Some("1992-09-05".to_string()),
        genre_ids: vec![16, 10759],
        origin_country: vec!["US".to_string()],
        original_language: Some("en".to_string()),
        overview: Some(format!("{name} overview")),
        poster_path: None,
        backdrop_path: None,
        popularity: 40.0,
        vote_average: 8.5,
        vote_count: 1200,
        adult: None,
        extra: Default::default(),
    }
}

/// `$2y$` hash of [`PASSWORD`], the form PHP tooling produces.
pub fn credential() -> StaticCredential {
    let hash = bcrypt::hash(PASSWORD, 4).expect("bcrypt hash");
    StaticCredential::new(USERNAME, format!("$2y${}", &hash[4..]))
}

pub fn app_with(catalog: Arc<FakeCatalog>) -> Router {
    build_router(AppState {
        catalog,
        credentials: Arc::new(credential()),
    })
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}
