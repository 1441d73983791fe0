//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `rest` - Hosted REST data API client via reqwest

pub mod auth;
pub mod memory;
pub mod search;
pub mod seed;
pub mod session;

#[cfg(feature = "rest")]
pub mod rest;

// Re-exports - In-Memory
pub use auth::{Argon2CredentialVerifier, JwtSessionTokens};
pub use memory::InMemoryBlogStore;
pub use search::{Debouncer, LiveSearch, SearchState};
pub use session::InMemorySessionStore;

// Re-exports - REST
#[cfg(feature = "rest")]
pub use rest::{
    DataApiClient, DataApiConfig, RestCategoryRepository, RestPostRepository, RetryPolicy,
};
