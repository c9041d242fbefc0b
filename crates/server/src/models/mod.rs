//! Domain models shared across routes and services.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod review;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use catalog::{Note, Product, Variant};
pub use order::{Order, OrderItem};
pub use review::Review;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
