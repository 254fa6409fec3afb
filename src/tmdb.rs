use crate::models::{Movie, Paged, TvShow};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::time::Duration;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const LANGUAGE: &str = "en-US";
const SORT_BY: &str = "popularity.desc";

/// Upstream catalog calls the routes depend on. One page per call.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn discover_movies(&self) -> Result<Paged<Movie>>;
    async fn discover_shows(&self) -> Result<Paged<TvShow>>;
    async fn search_movies(&self, query: &str) -> Result<Paged<Movie>>;
    async fn search_shows(&self, query: &str) -> Result<Paged<TvShow>>;
    async fn popular_movies(&self) -> Result<Value>;
    async fn popular_shows(&self) -> Result<Value>;
    async fn on_the_air_shows(&self) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("cinetica/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let base_url = env::var("TMDB_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| TMDB_BASE.to_string());
        Self::new(api_key, base_url)
    }

    fn discover_url(&self, collection: &str) -> String {
        format!(
            "{}/discover/{collection}?api_key={}&language={LANGUAGE}&sort_by={SORT_BY}",
            self.base_url, self.api_key
        )
    }

    fn search_url(&self, collection: &str, query: &str) -> String {
        format!(
            "{}/search/{collection}?api_key={}&query={}&language={LANGUAGE}&page=1",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        )
    }

    fn listing_url(&self, path: &str) -> String {
        format!(
            "{}/{path}?api_key={}&language={LANGUAGE}&page=1",
            self.base_url, self.api_key
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            // The URL carries the api key, so only the path goes into the error.
            return Err(anyhow!("{} -> {}: {}", redact(url), status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn discover_movies(&self) -> Result<Paged<Movie>> {
        self.get_json(&self.discover_url("movie"))
            .await
            .context("TMDB movie discovery failed")
    }

    async fn discover_shows(&self) -> Result<Paged<TvShow>> {
        self.get_json(&self.discover_url("tv"))
            .await
            .context("TMDB TV discovery failed")
    }

    async fn search_movies(&self, query: &str) -> Result<Paged<Movie>> {
        self.get_json(&self.search_url("movie", query))
            .await
            .with_context(|| format!("TMDB movie search failed for '{}'", query))
    }

    async fn search_shows(&self, query: &str) -> Result<Paged<TvShow>> {
        self.get_json(&self.search_url("tv", query))
            .await
            .with_context(|| format!("TMDB TV search failed for '{}'", query))
    }

    async fn popular_movies(&self) -> Result<Value> {
        self.get_json(&self.listing_url("movie/popular"))
            .await
            .context("TMDB popular movies failed")
    }

    async fn popular_shows(&self) -> Result<Value> {
        self.get_json(&self.listing_url("tv/popular"))
            .await
            .context("TMDB popular shows failed")
    }

    async fn on_the_air_shows(&self) -> Result<Value> {
        self.get_json(&self.listing_url("tv/on_the_air"))
            .await
            .context("TMDB on-the-air shows failed")
    }
}

fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
