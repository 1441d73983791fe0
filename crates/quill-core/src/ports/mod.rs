//! Ports - trait definitions for external collaborators.
//! Infrastructure crates implement these; the domain and handlers only see the traits.

mod auth;
mod repository;
mod session;

pub use auth::{AuthError, CredentialVerifier, TokenService};
pub use repository::{CategoryRepository, PostRepository};
pub use session::SessionStore;
