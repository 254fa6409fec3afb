use crate::auth::{AuthError, CredentialVerifier, StaticCredential};
use crate::models::MediaCollections;
use crate::tmdb::{CatalogApi, TmdbClient};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::{env, net::SocketAddr, sync::Arc};
use thiserror::Error;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

const MAX_BODY_BYTES: usize = 64 * 1024;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

/// Every failure a route can report, rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Upstream {
        message: &'static str,
        cause: anyhow::Error,
    },
    #[error("{0}")]
    Credentials(AuthError),
    #[error("Error while verifying password")]
    Verification(String),
    #[error("Invalid login request")]
    InvalidLogin(JsonRejection),
}

impl ApiError {
    fn upstream(message: &'static str, cause: anyhow::Error) -> Self {
        ApiError::Upstream { message, cause }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { .. } | ApiError::Verification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Credentials(_) | ApiError::InvalidLogin(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Verification(detail) => ApiError::Verification(detail),
            other => ApiError::Credentials(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream { message, cause } => error!("{}: {:#}", message, cause),
            ApiError::Credentials(reason) => warn!("Login rejected: {}", reason),
            ApiError::Verification(detail) => error!("Password verification error: {}", detail),
            ApiError::InvalidLogin(rejection) => {
                warn!("Malformed login body: {}", rejection.body_text())
            }
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn run_server() -> Result<()> {
    let catalog: Arc<dyn CatalogApi> = Arc::new(TmdbClient::from_env()?);
    let credential = StaticCredential::from_env()?;
    info!("Login enabled for user '{}'", credential.username());

    let state = AppState {
        catalog,
        credentials: Arc::new(credential),
    };

    let app = build_router(state);

    let addr: SocketAddr = env::var("CINETICA_BIND_ADDR")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("CINETICA_BIND_ADDR is not a valid socket address")?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/discover", get(discover))
        .route("/api/search", get(search))
        .route("/api/movies/popular", get(popular_movies))
        .route("/api/shows/popular", get(popular_shows))
        .route("/api/shows/on-the-air", get(on_the_air_shows))
        .route("/api/login", post(login))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn discover(State(state): State<AppState>) -> Result<Json<MediaCollections>, ApiError> {
    let (movies, shows) = tokio::try_join!(
        state.catalog.discover_movies(),
        state.catalog.discover_shows(),
    )
    .map_err(|e| ApiError::upstream("Failed to fetch discover data", e))?;

    debug!(
        movies = movies.results.len(),
        shows = shows.results.len(),
        "Discover aggregated"
    );
    Ok(Json(MediaCollections {
        movies: movies.results,
        shows: shows.results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MediaCollections>, ApiError> {
    let query = match params.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Ok(Json(MediaCollections::default())),
    };

    let (movies, shows) = tokio::try_join!(
        state.catalog.search_movies(&query),
        state.catalog.search_shows(&query),
    )
    .map_err(|e| ApiError::upstream("Failed to search", e))?;

    info!(
        "Search '{}' -> {} movies, {} shows",
        query,
        movies.results.len(),
        shows.results.len()
    );
    Ok(Json(MediaCollections {
        movies: movies.results,
        shows: shows.results,
    }))
}

async fn popular_movies(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .catalog
        .popular_movies()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch popular movies", e))
}

async fn popular_shows(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .catalog
        .popular_shows()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch popular shows", e))
}

async fn on_the_air_shows(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .catalog
        .on_the_air_shows()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch on-the-air shows", e))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload.map_err(ApiError::InvalidLogin)?;
    state
        .credentials
        .verify(&req.username, &req.password)
        .await?;
    info!("Login succeeded for '{}'", req.username);
    Ok(Json(json!({ "message": "Login successful" })))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
