//! Page navigation targets.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A page the front end should navigate to, e.g. `shop.html` or
/// `index.html#loginModal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageTarget(String);

impl PageTarget {
    /// Landing page after a login with no pending redirect.
    pub const DEFAULT_LANDING: &'static str = "shop.html";

    /// Login surface shown when a gated action needs an account.
    pub const LOGIN: &'static str = "index.html#loginModal";

    /// Where a successful signup sends the user.
    pub const AFTER_SIGNUP: &'static str = "#loginModal";

    /// Create a target from any page identifier.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    /// The default landing page (`shop.html`).
    #[must_use]
    pub fn default_landing() -> Self {
        Self::new(Self::DEFAULT_LANDING)
    }

    /// The login surface (`index.html#loginModal`).
    #[must_use]
    pub fn login() -> Self {
        Self::new(Self::LOGIN)
    }

    /// The post-signup target (`#loginModal`).
    #[must_use]
    pub fn after_signup() -> Self {
        Self::new(Self::AFTER_SIGNUP)
    }

    /// Returns the target as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PageTarget {
    fn default() -> Self {
        Self::default_landing()
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
