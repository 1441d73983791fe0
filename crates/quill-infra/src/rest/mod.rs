//! Hosted REST data API adapters.
//!
//! The data API exposes `posts` and `categories` tables PostgREST-style under
//! `/rest/v1/`. Reads and writes go through [`DataApiClient`], which carries
//! the static key and retries transient failures.

mod categories;
mod client;
mod posts;
mod rows;


pub use categories::RestCategoryRepository;
pub use client::{DataApiClient, DataApiConfig, RetryPolicy};
pub use posts::RestPostRepository;
