//! Session-related types.
//!
//! Types stored in the session for authentication state and the cart.

use serde::{Deserialize, Serialize};

use parfum_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's first name (shown in `/auth/me`).
    pub first_name: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the session cart.
    pub const CART: &str = "cart";
}
