//! Admin dashboard access.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// The argon2 hash of the admin secret. The plaintext is never kept.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    secret_hash: String,
}

impl AdminConfig {
    pub fn from_hash(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// The PHC string written back to the config file.
    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    /// Check a secret presented by a dashboard request.
    ///
    /// A blank secret is rejected without hashing. A stored value that is
    /// not a PHC string never verifies.
    pub fn verify_secret(&self, presented: &str) -> bool {
        let presented = presented.trim();
        if presented.is_empty() {
            return false;
        }
        let Ok(parsed_hash) = PasswordHash::new(&self.secret_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(presented.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
