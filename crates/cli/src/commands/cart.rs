//! Cart and purchase commands.
//!
//! # Usage
//!
//! ```bash
//! tidepool add --name "Blue Tang" --price "₱1,250"
//! tidepool cart
//! tidepool remove 0
//! tidepool checkout
//! tidepool buy --name "Koi" --price "₱1,500" --yes
//! ```

use std::fmt::Write as _;

use tidepool_storefront::models::{CartView, Product};
use tidepool_storefront::notify::Notifier;
use tidepool_storefront::services::Shop;
use tidepool_storefront::store::KeyValueStore;

use super::CommandError;

/// Render the cart modal as text.
#[must_use]
pub fn render_cart(view: &CartView) -> String {
    if let Some(message) = &view.empty_message {
        return message.clone();
    }

    let mut out = String::new();
    for line in &view.items {
        let _ = writeln!(out, "[{}] {}  {}", line.index, line.label, line.line_price);
    }
    out.push_str(&view.total);
    out
}

fn read_product(name: &str, price: &str) -> Result<Product, CommandError> {
    Product::from_card(Some(name), Some(price)).ok_or_else(|| CommandError::BadProduct {
        name: name.to_string(),
        price: price.to_string(),
    })
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CommandError::BadProduct` for an unreadable product, or the
/// `CartError` when adding fails.
pub fn add<S, N>(shop: &Shop<'_, S, N>, name: &str, price: &str) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    let product = read_product(name, price)?;
    shop.add_item(&product.name, product.price)?;
    Ok(render_cart(&shop.view_cart()))
}

/// Remove the cart line at `index`.
///
/// # Errors
///
/// Returns the `CartError` when the index is out of range.
pub fn remove<S, N>(shop: &Shop<'_, S, N>, index: usize) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    Ok(render_cart(&shop.remove_item(index)?))
}

/// Show the cart.
pub fn show<S, N>(shop: &Shop<'_, S, N>) -> String
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    render_cart(&shop.view_cart())
}

/// Check out.
///
/// # Errors
///
/// Returns the `CartError` when checkout fails.
pub fn checkout<S, N>(shop: &Shop<'_, S, N>) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    shop.checkout()?;
    Ok(show(shop))
}

/// Buy one product immediately.
///
/// # Errors
///
/// Returns `CommandError::BadProduct` for an unreadable product, or the
/// `CartError` when the purchase is refused.
pub fn buy<S, N>(shop: &Shop<'_, S, N>, name: &str, price: &str) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    let product = read_product(name, price)?;
    let confirmed = shop.buy_now(&product.name, product.price)?;
    Ok(if confirmed {
        format!("Bought {}", product.name)
    } else {
        "Purchase cancelled".to_string()
    })
}
