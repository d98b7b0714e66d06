//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration, login and the current session
//! - `cart` - Login-gated cart mutations and checkout
//! - `contact` - Contact form submission to the hosted form endpoint
//! - `shop` - Per-event controller that reports outcomes through a notifier

pub mod auth;
pub mod cart;
pub mod contact;
pub mod shop;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use contact::{ContactClient, ContactError, ContactForm, send_contact_message};
pub use shop::Shop;
