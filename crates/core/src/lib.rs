//! Tidepool Core - Shared domain types.
//!
//! This crate provides the types used across all Tidepool components:
//! - `storefront` - Account/cart state manager and its JSON HTTP surface
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Every type here validates itself on construction
//! and on deserialization, so a value read back from storage is either valid
//! or rejected as a whole.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for usernames, passwords, prices, cart
//!   entries and page targets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
