//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use tidepool_core::Username;

/// Who is using the storefront right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "username", rename_all = "snake_case")]
pub enum CurrentUser {
    /// Nobody is logged in.
    Guest,
    /// A username is stored in the session.
    Authenticated(Username),
}

impl CurrentUser {
    /// The logged-in username, if any.
    #[must_use]
    pub const fn username(&self) -> Option<&Username> {
        match self {
            Self::Guest => None,
            Self::Authenticated(username) => Some(username),
        }
    }

    /// Whether someone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Label shown in the profile corner: `👤 name` or `👥 Guest`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Guest => "👥 Guest".to_string(),
            Self::Authenticated(username) => format!("👤 {username}"),
        }
    }
}

impl From<Option<Username>> for CurrentUser {
    fn from(value: Option<Username>) -> Self {
        value.map_or(Self::Guest, Self::Authenticated)
    }
}

/// Record keys in the storage substrate.
pub mod keys {
    /// Key for the username -> password mapping.
    pub const USERS: &str = "users";

    /// Key for the logged-in username.
    pub const LOGGED_IN_USER: &str = "loggedInUser";

    /// Key for the cart entries.
    pub const CART: &str = "cart";

    /// Key for the page to resume after a forced login.
    pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";
}
