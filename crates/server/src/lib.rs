//! Parfum server library.
//!
//! This crate provides the shop's REST API as a library, allowing it to be
//! tested and reused by the CLI (migrations, price-list imports).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod payment;
pub mod routes;
pub mod services;
pub mod state;
