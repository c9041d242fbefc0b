//! Business logic services.
//!
//! Services sit between route handlers and the `db` repositories. Handlers
//! stay thin; validation, password hashing, checkout orchestration, and
//! price-list parsing live here.

pub mod auth;
pub mod checkout;
pub mod import;
