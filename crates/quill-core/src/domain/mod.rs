//! Domain entities - the core business objects.

mod category;
mod post;
mod session;

pub use category::{CategoryPolicy, DEFAULT_CATEGORIES, normalize_category_name};
pub use post::{DEFAULT_AUTHOR, Post, PostDraft};
pub use session::Session;
