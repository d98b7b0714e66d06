//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (see main.rs)
//!
//! # Auth
//! POST /auth/register          - Sign up
//! POST /auth/login             - Log in, resuming a deferred redirect
//! POST /auth/logout            - Log out
//! GET  /auth/me                - Current user label
//!
//! # Cart
//! GET  /cart                   - Cart modal contents
//! POST /cart/add               - Add one unit of a product
//! POST /cart/remove            - Remove a cart line by index
//!
//! # Purchase
//! POST /checkout               - Empty the cart
//! POST /buy                    - Buy one product immediately
//!
//! # Contact
//! POST /contact                - Forward the contact form
//!
//! # Navigation
//! GET  /nav/active             - Whether a nav link is the current page
//! GET  /nav/transition         - Whether a link click plays the exit transition
//! ```
//!
//! Every response body is a [`Reply`]: the operation's data, the notices it
//! raised, and where the page should go next.

pub mod auth;
pub mod cart;
pub mod contact;
pub mod nav;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use tidepool_core::{PageTarget, Price};

use crate::error::AppError;
use crate::models::Product;
use crate::notify::{CollectingNotifier, Notice};
use crate::state::AppState;

/// JSON body of every successful storefront response.
#[derive(Debug, Serialize)]
pub struct Reply<T> {
    pub data: Option<T>,
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<PageTarget>,
}

impl<T: Serialize> Reply<T> {
    /// A reply carrying data.
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            data: Some(data),
            notices: Vec::new(),
            redirect: None,
        }
    }

    /// Tell the client to navigate.
    #[must_use]
    pub fn redirect_to(mut self, target: PageTarget) -> Self {
        self.redirect = Some(target);
        self
    }
}

impl Reply<()> {
    /// A reply with nothing but notices.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: None,
            notices: Vec::new(),
            redirect: None,
        }
    }
}

/// Turn an operation result into a response carrying the collected notices.
fn respond<T: Serialize>(result: Result<Reply<T>, AppError>, notifier: &CollectingNotifier) -> Response {
    let notices = notifier.drain();
    match result {
        Ok(mut reply) => {
            reply.notices = notices;
            Json(reply).into_response()
        }
        Err(err) => err.with_notices(notices),
    }
}

/// Price as sent by a product card: a number or a label like `"₱1,250"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Amount(Price),
    Label(String),
}

/// Product fields sent by the add/buy buttons.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<PriceField>,
}

impl ProductForm {
    /// Read the product, as the card button would.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when the name or price is missing or
    /// unreadable.
    pub fn product(&self) -> Result<Product, AppError> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let product = match (name, &self.price) {
            (Some(name), Some(PriceField::Amount(price))) => Some(Product {
                name: name.to_owned(),
                price: *price,
            }),
            (_, Some(PriceField::Label(label))) => {
                Product::from_card(self.name.as_deref(), Some(label))
            }
            _ => None,
        };
        product.ok_or_else(|| AppError::BadRequest("product name and price are required".to_string()))
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the navigation routes router.
pub fn nav_routes() -> Router<AppState> {
    Router::new()
        .route("/active", get(nav::active))
        .route("/transition", get(nav::transition))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
        .nest("/nav", nav_routes())
        .route("/checkout", post(cart::checkout))
        .route("/buy", post(cart::buy))
        .route("/contact", post(contact::submit))
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(json: &str) -> ProductForm {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_product_from_label() {
        let product = form(r#"{"name":"Clownfish","price":"₱1,250"}"#).product().unwrap();
        assert_eq!(product.price, Price::from_units(1250));
    }

    #[test]
    fn test_product_from_amount() {
        let product = form(r#"{"name":" Guppy ","price":35}"#).product().unwrap();
        assert_eq!(product.name, "Guppy");
        assert_eq!(product.price, Price::from_units(35));
    }

    #[test]
    fn test_incomplete_product_rejected() {
        assert!(form(r#"{"name":"Guppy"}"#).product().is_err());
        assert!(form(r#"{"price":35}"#).product().is_err());
        assert!(form(r#"{"name":"Guppy","price":"sold out"}"#).product().is_err());
    }
}
