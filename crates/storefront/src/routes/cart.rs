//! Cart and purchase route handlers.
//!
//! Gated actions attempted by a guest answer 401 with `redirect` set to the
//! login surface; the interrupted page is remembered server-side and resumed
//! by the next successful login.

use axum::{Json, extract::State, response::Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::notify::CollectingNotifier;
use crate::state::AppState;

use super::{ProductForm, Reply, respond};

/// Cart line removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub index: usize,
}

/// Buy-now form data.
#[derive(Debug, Deserialize)]
pub struct BuyForm {
    #[serde(flatten)]
    pub product: ProductForm,
    /// The shopper's answer to the confirmation prompt.
    #[serde(default)]
    pub confirm: bool,
}

/// Outcome of a buy-now request.
#[derive(Debug, Serialize)]
pub struct BuyOutcome {
    pub confirmed: bool,
    pub prompt: Option<String>,
}

/// Show the cart modal contents.
///
/// GET /cart
pub async fn show(State(state): State<AppState>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| Ok::<_, AppError>(Reply::data(shop.view_cart())));
    respond(result, &notifier)
}

/// Add one unit of a product to the cart.
///
/// POST /cart/add
#[instrument(skip(state, form))]
pub async fn add(State(state): State<AppState>, Json(form): Json<ProductForm>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = form.product().and_then(|product| {
        state.with_shop(&notifier, |shop| {
            shop.add_item(&product.name, product.price)
                .map(|()| Reply::data(shop.view_cart()))
        })
    });
    respond(result, &notifier)
}

/// Remove a cart line and return the re-rendered cart.
///
/// POST /cart/remove
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Json(form): Json<RemoveForm>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| shop.remove_item(form.index).map(Reply::data));
    respond(result, &notifier)
}

/// Check out: empty the cart.
///
/// POST /checkout
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| shop.checkout().map(|()| Reply::empty()));
    respond(result, &notifier)
}

/// Buy a single product without touching the cart.
///
/// POST /buy
///
/// The confirmation prompt is answered by the `confirm` field; an unconfirmed
/// request returns the prompt so the page can ask and resubmit.
#[instrument(skip(state, form), fields(confirm = form.confirm))]
pub async fn buy(State(state): State<AppState>, Json(form): Json<BuyForm>) -> Response {
    let notifier = CollectingNotifier::answering(form.confirm);
    let result = form.product.product().and_then(|product| {
        state.with_shop(&notifier, |shop| {
            shop.buy_now(&product.name, product.price).map(|confirmed| {
                Reply::data(BuyOutcome {
                    confirmed,
                    prompt: notifier.prompts().pop(),
                })
            })
        })
    });
    respond(result, &notifier)
}
