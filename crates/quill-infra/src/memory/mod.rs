//! In-memory storage - used when no data API is configured, and in tests.

mod store;

pub use store::InMemoryBlogStore;
