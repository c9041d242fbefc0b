//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use parfum_core::{Email, UserId};

/// A shop account.
///
/// The password hash never leaves the `db` layer; this model carries only
/// fields that are safe to expose to the account owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}
