//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::fmt;

use anyhow::{Context, bail};
use directory::DeletePolicy;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Settings for the API process
pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    /// HS256 signing secret. `None` means a random one is generated at startup.
    pub jwt_secret: Option<Vec<u8>>,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub delete_policy: DeletePolicy,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup. Release builds must be given `JWT_SECRET`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug_build: bool,
    ) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&get)?,
        };

        let port = match get("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("API_PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {raw:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let jwt_secret = get("JWT_SECRET").map(String::into_bytes);
        if jwt_secret.is_none() && !debug_build {
            bail!("JWT_SECRET must be set in release builds");
        }

        let delete_policy = match get("DIRECTORY_DELETE_POLICY") {
            Some(raw) => raw.parse()?,
            None => DeletePolicy::default(),
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            max_connections,
            port,
            jwt_secret,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_origins,
            delete_policy,
        })
    }
}

fn database_url_from_parts(get: &impl Fn(&str) -> Option<String>) -> anyhow::Result<String> {
    let host = get("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = get("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = get("DB_USER").context("DATABASE_URL or DB_USER must be set")?;
    let name = get("DB_NAME").context("DATABASE_URL or DB_NAME must be set")?;

    Ok(match get("DB_PASSWORD") {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        None => format!("postgres://{user}@{host}:{port}/{name}"),
    })
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("port", &self.port)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("frontend_origins", &self.frontend_origins)
            .field("delete_policy", &self.delete_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], debug_build: bool) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned(), debug_build)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/org")], true).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = load(
            &[
                ("DB_HOST", "db"),
                ("DB_USER", "org"),
                ("DB_PASSWORD", "s3cret"),
                ("DB_NAME", "directory"),
            ],
            true,
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://org:s3cret@db:5432/directory");
    }

    #[test]
    fn test_missing_database_settings_fail() {
        assert!(load(&[], true).is_err());
    }

    #[test]
    fn test_release_build_requires_jwt_secret() {
        let vars = [("DATABASE_URL", "postgres://localhost/org")];
        assert!(load(&vars, false).is_err());

        let config = load(
            &[
                ("DATABASE_URL", "postgres://localhost/org"),
                ("JWT_SECRET", "change-me"),
            ],
            false,
        )
        .unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some(b"change-me".as_slice()));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let url = ("DATABASE_URL", "postgres://localhost/org");
        assert!(load(&[url, ("API_PORT", "http")], true).is_err());
        assert!(load(&[url, ("DIRECTORY_DELETE_POLICY", "cascade")], true).is_err());

        let config = load(&[url, ("DIRECTORY_DELETE_POLICY", "Detach")], true).unwrap();
        assert_eq!(config.delete_policy, DeletePolicy::Detach);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(
            &[
                ("DATABASE_URL", "postgres://org:s3cret@db/org"),
                ("JWT_SECRET", "change-me"),
            ],
            true,
        )
        .unwrap();
        let output = format!("{config:?}");
        assert!(!output.contains("s3cret"));
        assert!(!output.contains("change-me"));
    }
}
