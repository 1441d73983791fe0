//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use quill_core::domain::CategoryPolicy;

/// Hosted data API settings. Absent when `DATA_API_URL` is unset.
#[derive(Debug, Clone)]
pub struct DataApiSettings {
    pub url: String,
    pub key: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

/// Where the admin password comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminPassword {
    /// Argon2 PHC string.
    Hash(String),
    Plain(String),
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub admin_email: String,
    pub admin_password: AdminPassword,
    pub session_secret: String,
    pub session_ttl: chrono::Duration,
}

/// How `GET /api/search` finds matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Ask the storage collaborator.
    Remote,
    /// Run the matcher over the full listing.
    Local,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_api: Option<DataApiSettings>,
    pub auth: AuthSettings,
    pub categories: CategoryPolicy,
    pub search_mode: SearchMode,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let data_api = lookup("DATA_API_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DataApiSettings {
                url,
                key: lookup("DATA_API_KEY").unwrap_or_default(),
                timeout: Duration::from_secs(parsed("DATA_API_TIMEOUT_SECS").unwrap_or(10)),
                max_retries: parsed("DATA_API_MAX_RETRIES")
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(2),
                retry_backoff: Duration::from_millis(
                    parsed("DATA_API_RETRY_BACKOFF_MS").unwrap_or(200),
                ),
            });

        let admin_password = match lookup("ADMIN_PASSWORD_HASH") {
            Some(hash) if !hash.trim().is_empty() => AdminPassword::Hash(hash),
            _ => AdminPassword::Plain(
                lookup("ADMIN_PASSWORD").unwrap_or_else(|| "admin".to_string()),
            ),
        };

        let auth = AuthSettings {
            admin_email: lookup("ADMIN_EMAIL").unwrap_or_else(|| "admin@example.com".to_string()),
            admin_password,
            session_secret: lookup("SESSION_SECRET")
                .unwrap_or_else(|| "change-me-in-production".to_string()),
            session_ttl: chrono::Duration::hours(
                parsed("SESSION_TTL_HOURS")
                    .and_then(|h| i64::try_from(h).ok())
                    .unwrap_or(12),
            ),
        };

        let categories = match lookup("CATEGORY_MODE").as_deref().map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("open") => CategoryPolicy::Open,
            _ => match lookup("CATEGORIES") {
                Some(list) if !list.trim().is_empty() => CategoryPolicy::Closed(
                    list.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string)
                        .collect(),
                ),
                _ => CategoryPolicy::default(),
            },
        };

        let search_mode = match lookup("SEARCH_MODE").as_deref().map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("local") => SearchMode::Local,
            _ => SearchMode::Remote,
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            data_api,
            auth,
            categories,
            search_mode,
        }
    }

    /// Log settings that are unsafe outside development.
    pub fn warn_insecure_defaults(&self) {
        if let AdminPassword::Plain(password) = &self.auth.admin_password {
            if password == "admin" {
                tracing::warn!("ADMIN_PASSWORD is the default; set ADMIN_PASSWORD_HASH for production");
            }
        }
        if self.auth.session_secret == "change-me-in-production" {
            tracing::warn!("SESSION_SECRET is the default; sessions can be forged");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
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
        assert!(config.data_api.is_none());
        assert_eq!(config.auth.admin_email, "admin@example.com");
        assert_eq!(config.auth.admin_password, AdminPassword::Plain("admin".into()));
        assert_eq!(config.auth.session_ttl, chrono::Duration::hours(12));
        assert_eq!(config.categories, CategoryPolicy::default());
        assert_eq!(config.search_mode, SearchMode::Remote);
    }

    #[test]
    fn test_data_api_settings() {
        let config = config(&[
            ("DATA_API_URL", "https://db.example.test"),
            ("DATA_API_KEY", "anon"),
            ("DATA_API_MAX_RETRIES", "5"),
            ("DATA_API_RETRY_BACKOFF_MS", "50"),
        ]);
        let api = config.data_api.unwrap();
        assert_eq!(api.url, "https://db.example.test");
        assert_eq!(api.key, "anon");
        assert_eq!(api.timeout, Duration::from_secs(10));
        assert_eq!(api.max_retries, 5);
        assert_eq!(api.retry_backoff, Duration::from_millis(50));
    }

    #[test]
    fn test_category_policy_selection() {
        assert_eq!(config(&[("CATEGORY_MODE", "Open")]).categories, CategoryPolicy::Open);
        assert_eq!(
            config(&[("CATEGORIES", "Space, Energy,,")]).categories,
            CategoryPolicy::Closed(vec!["Space".into(), "Energy".into()])
        );
    }

    #[test]
    fn test_password_hash_wins_over_plaintext() {
        let config = config(&[
            ("ADMIN_PASSWORD_HASH", "$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
            ("ADMIN_PASSWORD", "ignored"),
        ]);
        assert!(matches!(config.auth.admin_password, AdminPassword::Hash(_)));
    }

    #[test]
    fn test_local_search_mode() {
        assert_eq!(config(&[("SEARCH_MODE", "local")]).search_mode, SearchMode::Local);
    }
}
