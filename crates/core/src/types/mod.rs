//! Core types for Tidepool.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod page;
pub mod password;
pub mod price;
pub mod username;

pub use cart::{Cart, CartEntry, checked_total, compute_total};
pub use page::PageTarget;
pub use password::{Password, PasswordError};
pub use price::{Price, PriceError};
pub use username::{Username, UsernameError};
