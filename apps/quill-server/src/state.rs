//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::CategoryPolicy;
use quill_core::ports::{
    AuthError, CategoryRepository, CredentialVerifier, PostRepository, SessionStore, TokenService,
};
use quill_infra::auth::SessionTokenConfig;
use quill_infra::{
    Argon2CredentialVerifier, InMemoryBlogStore, InMemorySessionStore, JwtSessionTokens,
};

use crate::config::{AdminPassword, AppConfig, SearchMode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<dyn TokenService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub category_policy: CategoryPolicy,
    pub search_mode: SearchMode,
    pub session_ttl: chrono::Duration,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Fails only when the admin credential cannot be loaded.
    pub fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let (posts, categories) = storage(config);

        let credentials = match &config.auth.admin_password {
            AdminPassword::Hash(hash) => {
                Argon2CredentialVerifier::new(&config.auth.admin_email, hash.clone())?
            }
            AdminPassword::Plain(password) => {
                Argon2CredentialVerifier::from_plaintext(&config.auth.admin_email, password)?
            }
        };

        let tokens = JwtSessionTokens::new(SessionTokenConfig {
            secret: config.auth.session_secret.clone(),
            ..SessionTokenConfig::default()
        });

        tracing::info!(
            search_mode = ?config.search_mode,
            category_policy = ?config.categories,
            "Application state initialized"
        );

        Ok(Self {
            posts,
            categories,
            sessions: Arc::new(InMemorySessionStore::new()),
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
            category_policy: config.categories.clone(),
            search_mode: config.search_mode,
            session_ttl: config.auth.session_ttl,
        })
    }
}

type Storage = (Arc<dyn PostRepository>, Arc<dyn CategoryRepository>);

fn in_memory() -> Storage {
    let store = Arc::new(InMemoryBlogStore::seeded());
    (store.clone(), store)
}

#[cfg(feature = "rest")]
fn storage(config: &AppConfig) -> Storage {
    use quill_infra::{
        DataApiClient, DataApiConfig, RestCategoryRepository, RestPostRepository, RetryPolicy,
    };

    let Some(settings) = &config.data_api else {
        tracing::warn!("DATA_API_URL not set. Serving bundled sample posts from memory.");
        return in_memory();
    };

    let api_config = DataApiConfig {
        base_url: settings.url.clone(),
        api_key: settings.key.clone(),
        timeout: settings.timeout,
        retry: RetryPolicy {
            max_retries: settings.max_retries,
            initial_backoff: settings.retry_backoff,
        },
    };

    match DataApiClient::new(api_config) {
        Ok(client) => (
            Arc::new(RestPostRepository::new(client.clone())),
            Arc::new(RestCategoryRepository::new(client)),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to set up data API client: {}. Using in-memory fallback.",
                e
            );
            in_memory()
        }
    }
}

#[cfg(not(feature = "rest"))]
fn storage(config: &AppConfig) -> Storage {
    if config.data_api.is_some() {
        tracing::warn!("DATA_API_URL is set but the rest feature is disabled; ignoring it");
    }
    tracing::info!("Running without rest feature - using in-memory store");
    in_memory()
}
