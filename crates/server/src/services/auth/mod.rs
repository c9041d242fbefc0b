//! Shopper authentication service.
//!
//! Email + password accounts with argon2 hashing. Sessions are handled by
//! the route layer; this service only validates, hashes, and talks to the
//! user repository.

mod error;

pub use error::AuthError;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash::rand_core::OsRng};
use sqlx::PgPool;

use parfum_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingField` if a name field is empty.
    /// - `AuthError::InvalidEmail` if the email does not parse.
    /// - `AuthError::WeakPassword` if the password is too short.
    /// - `AuthError::EmailTaken` if an account already exists for the email.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() {
            return Err(AuthError::MissingField("firstName"));
        }
        if last_name.is_empty() {
            return Err(AuthError::MissingField("lastName"));
        }

        let email = Email::parse(email)?;

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(password)?;

        match self
            .users
            .create(first_name, last_name, &email, &password_hash)
            .await
        {
            Ok(user) => Ok(user),
            Err(RepositoryError::Conflict(_)) => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and return the account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email and a
    /// wrong password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some((user, stored_hash)) = self.users.get_with_password_hash(&email).await? else {
            // Burn a hash anyway so response time does not leak whether the
            // email exists.
            let _ = hash_password(password);
            return Err(AuthError::InvalidCredentials);
        };

        if verify_password(password, &stored_hash)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
