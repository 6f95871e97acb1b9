//! Application settings loaded from environment variables.

use std::env;

use jsonwebtoken::Algorithm;
use thiserror::Error;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_ALGORITHM, DEFAULT_DATABASE_URL,
    DEFAULT_PROJECT_NAME, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_ACCESS_TOKEN_EXPIRE_MINUTES, MIN_SECRET_KEY_LENGTH,
};

/// Startup configuration errors. Any of these prevents the server from starting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY environment variable must be set")]
    MissingSecretKey,

    #[error("SECRET_KEY must be at least {0} characters long")]
    SecretKeyTooShort(usize),

    #[error("Unsupported token algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub project_name: String,
    pub database_url: String,
    secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("project_name", &self.project_name)
            .field("database_url", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// The signing key has no default: a missing or short `SECRET_KEY` is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSecretKey)?;

        if secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(ConfigError::SecretKeyTooShort(MIN_SECRET_KEY_LENGTH));
        }

        let algorithm_name = lookup("ALGORITHM").unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
        let algorithm = parse_hmac_algorithm(&algorithm_name)?;

        let access_token_expire_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if (1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&minutes) => minutes,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            project_name: lookup("PROJECT_NAME")
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            secret_key,
            algorithm,
            access_token_expire_minutes,
            server_host: lookup("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
        })
    }

    /// Get signing key bytes for token signing/verification.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Only the HMAC family works with a shared secret key.
fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name.trim().parse::<Algorithm>() {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
    }
}
