//! Tidepool Storefront library.
//!
//! The account/cart state manager behind the storefront, plus the JSON HTTP
//! surface that drives it. Provided as a library so the CLI and the
//! integration tests share one implementation.
//!
//! All state lives in an injected [`store::KeyValueStore`]; all user-facing
//! outcomes go through an injected [`notify::Notifier`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod nav;
pub mod notify;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
