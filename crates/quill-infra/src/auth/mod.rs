//! Authentication implementations.

mod credentials;
mod token;

pub use credentials::{Argon2CredentialVerifier, hash_password};
pub use token::{JwtSessionTokens, SessionTokenConfig};
