//! Contact form route handler.
//!
//! Forwards the contact form to the configured hosted form endpoint. The
//! storefront session and cart are never touched.

use axum::{Json, extract::State, response::Response};
use tracing::instrument;

use crate::notify::CollectingNotifier;
use crate::services::{ContactForm, send_contact_message};
use crate::state::AppState;

use super::{Reply, respond};

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(State(state): State<AppState>, Json(form): Json<ContactForm>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = send_contact_message(state.contact(), &form, &notifier)
        .await
        .map(|()| Reply::empty())
        .map_err(Into::into);
    respond(result, &notifier)
}
