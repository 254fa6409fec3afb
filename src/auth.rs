//! Credential check behind the login route.
use anyhow::Result;
use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::env;
use thiserror::Error;

pub const DEFAULT_USERNAME: &str = "admin";
/// Compiled-in hash for the default identity. Deployments override it with
/// `CINETICA_PASSWORD_HASH`.
pub const DEFAULT_PASSWORD_HASH: &str =
    "$2y$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username")]
    UnknownUser,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("password verification failed: {0}")]
    Verification(String),
}

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(())` means the pair is valid. No token is issued.
    async fn verify(&self, username: &str, password: &str) -> Result<(), AuthError>;
}

/// A single username and bcrypt hash.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    username: String,
    password_hash: String,
}

impl StaticCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let username = env::var("CINETICA_USERNAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password_hash = env::var("CINETICA_PASSWORD_HASH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD_HASH.to_string());
        Ok(Self::new(username, password_hash))
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Default for StaticCredential {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD_HASH)
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredential {
    async fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if !constant_time_eq(username.as_bytes(), self.username.as_bytes()) {
            return Err(AuthError::UnknownUser);
        }

        let hash = normalize_hash_prefix(&self.password_hash);
        let password = password.to_string();
        let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Verification(e.to_string()))?
            .map_err(|e| AuthError::Verification(e.to_string()))?;

        if matched {
            Ok(())
        } else {
            Err(AuthError::WrongPassword)
        }
    }
}

/// PHP's `password_hash` emits `$2y$`; rewrite it to the equivalent `$2b$`.
pub fn normalize_hash_prefix(hash: &str) -> String {
    match hash.strip_prefix("$2y$") {
        Some(rest) => format!("$2b${rest}"),
        None => hash.to_string(),
    }
}
