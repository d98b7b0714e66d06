//! Rendered cart views.

use serde::Serialize;

use tidepool_core::{Cart, CartEntry};

/// Message shown in place of the lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty 🛒";

/// One line of the cart modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    /// Position in the cart; the handle for removal.
    pub index: usize,
    pub name: String,
    pub quantity: u32,
    /// `"{name} x{quantity}"`.
    pub label: String,
    /// Line total, e.g. `"₱20"`.
    pub line_price: String,
}

/// The cart modal's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Present only when the cart is empty.
    pub empty_message: Option<String>,
    /// `"Total: ₱{total}"`, or empty for an empty cart.
    pub total: String,
    pub item_count: u64,
}

impl CartLineView {
    fn new(index: usize, entry: &CartEntry) -> Self {
        Self {
            index,
            name: entry.name.clone(),
            quantity: entry.quantity.get(),
            label: format!("{} x{}", entry.name, entry.quantity),
            line_price: entry.line_total().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        if cart.is_empty() {
            return Self {
                items: Vec::new(),
                empty_message: Some(EMPTY_CART_MESSAGE.to_string()),
                total: String::new(),
                item_count: 0,
            };
        }

        Self {
            items: cart
                .iter()
                .enumerate()
                .map(|(index, entry)| CartLineView::new(index, entry))
                .collect(),
            empty_message: None,
            total: format!("Total: {}", cart.total().display()),
            item_count: cart.item_count(),
        }
    }
}
