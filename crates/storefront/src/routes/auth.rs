//! Account route handlers.

use axum::{Json, extract::State, response::Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::models::CurrentUser;
use crate::notify::CollectingNotifier;
use crate::services::AuthError;
use crate::state::AppState;

use super::{Reply, respond};

/// Signup and login form data.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Session identity as the header badge shows it.
#[derive(Debug, Serialize)]
pub struct MeView {
    #[serde(flatten)]
    pub user: CurrentUser,
    pub label: String,
}

impl From<CurrentUser> for MeView {
    fn from(user: CurrentUser) -> Self {
        let label = user.label();
        Self { user, label }
    }
}

/// Sign up.
///
/// POST /auth/register
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn register(State(state): State<AppState>, Json(form): Json<CredentialsForm>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| {
        shop.register(&form.username, &form.password)
            .map(|target| Reply::empty().redirect_to(target))
    });
    respond(result, &notifier)
}

/// Log in.
///
/// POST /auth/login
///
/// Redirects to the page a forced login interrupted, or the shop.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(State(state): State<AppState>, Json(form): Json<CredentialsForm>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| {
        let target = shop.login(&form.username, &form.password)?;
        let user = shop.current_user();
        if let Some(username) = user.username() {
            set_sentry_user(username);
        }
        Ok::<_, AuthError>(Reply::data(MeView::from(user)).redirect_to(target))
    });
    respond(result, &notifier)
}

/// Log out.
///
/// POST /auth/logout
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| shop.logout().map(|()| Reply::empty()));
    clear_sentry_user();
    respond(result, &notifier)
}

/// Current session identity.
///
/// GET /auth/me
pub async fn me(State(state): State<AppState>) -> Response {
    let notifier = CollectingNotifier::new();
    let result = state.with_shop(&notifier, |shop| {
        Ok::<_, AppError>(Reply::data(MeView::from(shop.current_user())))
    });
    respond(result, &notifier)
}
