//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or password. Deliberately indistinguishable so the login
    /// endpoint cannot be used to probe which emails have accounts.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// A required registration field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Password does not meet the minimum requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] parfum_core::EmailError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing or verification failed internally.
    #[error("password hashing failure")]
    PasswordHash,
}
