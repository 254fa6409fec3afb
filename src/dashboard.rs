//! Client side of the dashboard: calls the aggregation routes and drives a
//! [`BrowseState`] with the responses.
use crate::models::{MediaCollections, Movie, Paged, TvShow};
use crate::view::{BlankQuery, BrowseState, Collection, Effect};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// The server refused the credentials; carries its message.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[derive(Deserialize)]
struct LoginReply {
    message: Option<String>,
    error: Option<String>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build dashboard HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}: {}", path, status, text));
        }
        serde_json::from_str(&text).with_context(|| format!("invalid JSON from {}", path))
    }

    pub async fn discover(&self) -> Result<MediaCollections> {
        self.get_json("/api/discover", &[]).await
    }

    pub async fn search(&self, query: &str) -> Result<MediaCollections> {
        self.get_json("/api/search", &[("query", query)]).await
    }

    pub async fn popular_movies(&self) -> Result<Paged<Movie>> {
        self.get_json("/api/movies/popular", &[]).await
    }

    pub async fn popular_shows(&self) -> Result<Paged<TvShow>> {
        self.get_json("/api/shows/popular", &[]).await
    }

    pub async fn on_the_air(&self) -> Result<Paged<TvShow>> {
        self.get_json("/api/shows/on-the-air", &[]).await
    }

    /// `Ok` carries the server's success message; the caller navigates on it.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, LoginError> {
        let url = format!("{}/api/login", self.base_url);
        let res = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .context("login request failed")?;
        let status = res.status();
        let reply: LoginReply = res.json().await.context("invalid login response")?;
        match (status, reply) {
            (s, LoginReply { message, .. }) if s.is_success() => {
                Ok(message.unwrap_or_default())
            }
            (StatusCode::BAD_REQUEST, LoginReply { error: Some(e), .. }) => {
                Err(LoginError::Rejected(e))
            }
            (s, reply) => Err(LoginError::Transport(anyhow!(
                "login failed with {}: {}",
                s,
                reply.error.unwrap_or_default()
            ))),
        }
    }
}

/// Where a page gets its default listing and which half of a search it keeps.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Collection: Collection + Send + Sync;

    fn title(&self) -> &'static str;
    fn blank_query(&self) -> BlankQuery;
    async fn load_default(&self, client: &DashboardClient) -> Result<Self::Collection>;
    fn from_search(&self, results: MediaCollections) -> Self::Collection;
}

pub struct DiscoverSource;
pub struct PopularMoviesSource;
pub struct PopularShowsSource;
pub struct OnTheAirSource;

#[async_trait]
impl PageSource for DiscoverSource {
    type Collection = MediaCollections;

    fn title(&self) -> &'static str {
        "Discover"
    }

    fn blank_query(&self) -> BlankQuery {
        BlankQuery::Refetch
    }

    async fn load_default(&self, client: &DashboardClient) -> Result<MediaCollections> {
        client.discover().await
    }

    fn from_search(&self, results: MediaCollections) -> MediaCollections {
        results
    }
}

#[async_trait]
impl PageSource for PopularMoviesSource {
    type Collection = Vec<Movie>;

    fn title(&self) -> &'static str {
        "Popular Movies"
    }

    fn blank_query(&self) -> BlankQuery {
        BlankQuery::RestoreOriginal
    }

    async fn load_default(&self, client: &DashboardClient) -> Result<Vec<Movie>> {
        Ok(client.popular_movies().await?.results)
    }

    fn from_search(&self, results: MediaCollections) -> Vec<Movie> {
        results.movies
    }
}

#[async_trait]
impl PageSource for PopularShowsSource {
    type Collection = Vec<TvShow>;

    fn title(&self) -> &'static str {
        "Popular TV Shows"
    }

    fn blank_query(&self) -> BlankQuery {
        BlankQuery::RestoreOriginal
    }

    async fn load_default(&self, client: &DashboardClient) -> Result<Vec<TvShow>> {
        Ok(client.popular_shows().await?.results)
    }

    fn from_search(&self, results: MediaCollections) -> Vec<TvShow> {
        results.shows
    }
}

#[async_trait]
impl PageSource for OnTheAirSource {
    type Collection = Vec<TvShow>;

    fn title(&self) -> &'static str {
        "On The Air"
    }

    fn blank_query(&self) -> BlankQuery {
        BlankQuery::RestoreOriginal
    }

    async fn load_default(&self, client: &DashboardClient) -> Result<Vec<TvShow>> {
        Ok(client.on_the_air().await?.results)
    }

    fn from_search(&self, results: MediaCollections) -> Vec<TvShow> {
        results.shows
    }
}

/// A page's state plus the source it fetches from.
pub struct Page<S: PageSource> {
    source: S,
    pub state: BrowseState<S::Collection>,
}

impl<S: PageSource> Page<S> {
    pub fn new(source: S) -> Self {
        let state = BrowseState::new(source.blank_query());
        Self { source, state }
    }

    pub fn title(&self) -> &'static str {
        self.state.heading(self.source.title())
    }

    pub async fn mount(&mut self, client: &DashboardClient) {
        let effect = self.state.mount();
        self.drive(client, effect).await;
    }

    pub async fn search(&mut self, client: &DashboardClient, query: &str) {
        self.state.set_query(query);
        let effect = self.state.submit_search();
        self.drive(client, effect).await;
    }

    /// Performs one effect and feeds its outcome back into the state.
    pub async fn drive(&mut self, client: &DashboardClient, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::LoadDefault { ticket } => match self.source.load_default(client).await {
                Ok(collection) => {
                    self.state.default_loaded(ticket, collection);
                }
                Err(e) => self.state.fetch_failed(ticket, &e),
            },
            Effect::Search { query, ticket } => match client.search(&query).await {
                Ok(results) => {
                    let collection = self.source.from_search(results);
                    self.state.search_completed(ticket, collection);
                }
                Err(e) => self.state.fetch_failed(ticket, &e),
            },
        }
    }
}

/// Login form state: the error line under the button, cleared on each attempt.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub logged_in: bool,
}

impl LoginForm {
    pub async fn submit(&mut self, client: &DashboardClient) {
        self.error = None;
        match client.login(&self.username, &self.password).await {
            Ok(message) => {
                info!("{}", message);
                self.logged_in = true;
            }
            Err(LoginError::Rejected(reason)) => {
                self.logged_in = false;
                self.error = Some(reason);
            }
            Err(LoginError::Transport(e)) => {
                self.logged_in = false;
                self.error = Some(format!("{:#}", e));
            }
        }
    }
}
