//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Catalog
//! GET  /api/products                    - Product listing with filters
//! GET  /api/products/{id}               - Product detail
//! GET  /api/products/{id}/reviews       - Product reviews
//! POST /api/products/{id}/reviews       - Create review (auth)
//!
//! # Cart (session-scoped)
//! GET  /api/cart                        - Current cart
//! POST /api/cart                        - Add a variant to the cart
//!
//! # Auth
//! POST /api/auth/register               - Create account
//! POST /api/auth/login                  - Login
//! POST /api/auth/logout                 - Logout (destroys session)
//! GET  /api/auth/me                     - Current session user
//!
//! # Orders & checkout (auth)
//! GET  /api/orders                      - Caller's order history
//! POST /api/checkout/create-payment     - Create order + gateway payment
//!
//! # Payment gateway
//! POST /api/payments/webhook            - Gateway notifications (unauthenticated)
//!
//! # Admin
//! POST /api/admin/upload-pricelist      - Import a supplier price list (auth)
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router (reviews nest under a product).
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route(
            "/{id}/reviews",
            get(reviews::index).post(reviews::create),
        )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/cart", get(cart::show).post(cart::add))
        .nest("/auth", auth_routes())
        .route("/orders", get(orders::index))
        .route("/checkout/create-payment", post(checkout::create_payment))
        .route("/payments/webhook", post(payments::webhook))
        .route("/admin/upload-pricelist", post(admin::upload_pricelist))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/api", api_routes())
}
