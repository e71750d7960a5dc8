//! Server-side configuration.

use axum::http::{header, HeaderValue, Method};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug)]
pub enum ConfigError {
    InvalidCorsOrigin(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCorsOrigin(origin) => write!(f, "invalid CORS origin `{origin}`"),
        }
    }
}

impl Error for ConfigError {}

/// Settings the HTTP layer needs at request time.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// SQLite file opened once per request.
    pub db_path: PathBuf,
    /// Survey dataset for `/populate`. `None` disables population.
    pub seed_file: Option<PathBuf>,
    /// Allowed browser origins. Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
}

impl ApiConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            seed_file: None,
            cors_origins: Vec::new(),
        }
    }

    pub fn with_seed_file(mut self, seed_file: Option<PathBuf>) -> Self {
        self.seed_file = seed_file;
        self
    }

    /// Restricts CORS to `origins`. Blank entries are ignored and `*` keeps
    /// any origin allowed.
    pub fn with_cors_origins<I, S>(mut self, origins: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        let mut wildcard = false;
        for origin in origins {
            let origin = origin.as_ref().trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                wildcard = true;
                continue;
            }
            let value = origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))?;
            parsed.push(value);
        }
        if wildcard {
            parsed.clear();
        }
        self.cors_origins = parsed;
        Ok(self)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let allow_origin = if self.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(self.cors_origins.clone())
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, ConfigError};

    #[test]
    fn blank_origins_are_skipped() {
        let config = ApiConfig::new("db.sqlite3")
            .with_cors_origins(["http://localhost:5173", "  ", ""])
            .unwrap();
        assert_eq!(config.cors_origins.len(), 1);
        assert_eq!(config.cors_origins[0], "http://localhost:5173");
    }

    #[test]
    fn wildcard_keeps_any_origin() {
        let config = ApiConfig::new("db.sqlite3")
            .with_cors_origins(["http://localhost:5173", "*"])
            .unwrap();
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        let err = ApiConfig::new("db.sqlite3")
            .with_cors_origins(["http://bad\norigin"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCorsOrigin(_)));
    }
}
