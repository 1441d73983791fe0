//! Static admin credential check backed by an Argon2 hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{AuthError, CredentialVerifier};

/// Accepts exactly one email/password pair.
///
/// The password is only ever held as an Argon2 PHC string. Emails compare
/// case-insensitively.
pub struct Argon2CredentialVerifier {
    argon2: Argon2<'static>,
    email: String,
    password_hash: String,
}

impl Argon2CredentialVerifier {
    /// Build from a stored PHC hash (`$argon2id$...`).
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Result<Self, AuthError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::default(),
            email: email.into().trim().to_lowercase(),
            password_hash,
        })
    }

    /// Build from a plaintext password, hashing it once up front.
    pub fn from_plaintext(email: impl Into<String>, password: &str) -> Result<Self, AuthError> {
        Self::new(email, hash_password(password)?)
    }
}

/// Hash a password into a PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashingError(e.to_string()))
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        // Always run the hash check so a wrong email costs the same as a wrong password.
        let password_ok = self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        let email_ok = email.trim().to_lowercase() == self.email;

        Ok(email_ok && password_ok)
    }
}
