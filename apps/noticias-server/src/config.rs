//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use noticias_infra::{DatabaseConfig, JwtConfig};

/// URL prefix uploaded images are served from when none is configured.
const DEFAULT_UPLOAD_PREFIX: &str = "/uploads";

/// Default upper bound for one uploaded image (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where uploaded images go and how they are exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub public_prefix: String,
    pub max_bytes: usize,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub uploads: UploadConfig,
    pub session: JwtConfig,
    /// External sign-in page linked from `/login`.
    pub login_provider_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| Parsed(lookup(key));

        let database = non_empty("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").or(20),
            min_connections: parsed("DB_MIN_CONNECTIONS").or(2),
        });

        let uploads = UploadConfig {
            dir: non_empty("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/uploads")),
            public_prefix: non_empty("UPLOAD_PUBLIC_PREFIX")
                .and_then(|p| upload_prefix(&p))
                .unwrap_or_else(|| DEFAULT_UPLOAD_PREFIX.to_string()),
            max_bytes: parsed("MAX_UPLOAD_BYTES").or(DEFAULT_MAX_UPLOAD_BYTES),
        };

        let defaults = JwtConfig::default();
        let session = JwtConfig {
            secret: non_empty("SESSION_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parsed("SESSION_EXPIRATION_HOURS").or(defaults.expiration_hours),
            issuer: non_empty("SESSION_ISSUER").unwrap_or(defaults.issuer),
        };

        Self {
            host: non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed("PORT").or(8080),
            database,
            uploads,
            session,
            login_provider_url: non_empty("LOGIN_PROVIDER_URL"),
        }
    }
}

/// Normalise a configured upload prefix to `/segment[/segment]`. The site root
/// is refused since `{prefix}/{file}` would then shadow the page routes.
fn upload_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        tracing::warn!(
            configured = raw,
            fallback = DEFAULT_UPLOAD_PREFIX,
            "UPLOAD_PUBLIC_PREFIX cannot be the site root"
        );
        return None;
    }
    Some(format!("/{trimmed}"))
}

/// A raw variable that parses into whatever type its default has.
struct Parsed(Option<String>);

impl Parsed {
    fn or<T: FromStr>(self, default: T) -> T {
        self.0
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.uploads.dir, PathBuf::from("public/uploads"));
        assert_eq!(config.uploads.public_prefix, "/uploads");
        assert_eq!(config.uploads.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.session.expiration_hours, 24);
        assert!(config.login_provider_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/noticias"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("UPLOAD_PUBLIC_PREFIX", "media/"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("SESSION_SECRET", "s3cret"),
            ("LOGIN_PROVIDER_URL", "https://auth.example.com/login"),
        ]);
        assert_eq!(config.port, 3000);
        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/noticias");
        assert_eq!(db.max_connections, 5);
        assert_eq!(db.min_connections, 2);
        assert_eq!(config.uploads.public_prefix, "/media");
        assert_eq!(config.uploads.max_bytes, 1024);
        assert_eq!(config.session.secret, "s3cret");
        assert_eq!(
            config.login_provider_url.as_deref(),
            Some("https://auth.example.com/login")
        );
    }

    #[test]
    fn test_root_upload_prefix_falls_back() {
        for raw in ["/", "//", " / "] {
            let config = config(&[("UPLOAD_PUBLIC_PREFIX", raw)]);
            assert_eq!(config.uploads.public_prefix, "/uploads", "{raw:?}");
        }

        let config = config(&[("UPLOAD_PUBLIC_PREFIX", "/static/media/")]);
        assert_eq!(config.uploads.public_prefix, "/static/media");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[("PORT", "not-a-port"), ("DATABASE_URL", "  ")]);
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
    }
}
