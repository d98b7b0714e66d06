//! Domain models for the storefront.
//!
//! # Models
//!
//! - `user` - The persisted account mapping
//! - `session` - Record keys and the current-user identity
//! - `cart` - Rendered cart views
//! - `product` - Product data read off a product card

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartLineView, CartView};
pub use product::Product;
pub use session::{CurrentUser, keys};
pub use user::Accounts;
