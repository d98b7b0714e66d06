//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! tidepool register marina reef
//! tidepool login marina reef
//! tidepool whoami
//! tidepool logout
//! ```

use tidepool_storefront::notify::Notifier;
use tidepool_storefront::services::Shop;
use tidepool_storefront::store::KeyValueStore;

use super::CommandError;

/// Sign up.
///
/// # Errors
///
/// Returns the `AuthError` when signup fails.
pub fn register<S, N>(shop: &Shop<'_, S, N>, username: &str, password: &str) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    let target = shop.register(username, password)?;
    Ok(format!("next: {target}"))
}

/// Log in.
///
/// # Errors
///
/// Returns the `AuthError` when login fails.
pub fn login<S, N>(shop: &Shop<'_, S, N>, username: &str, password: &str) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    let target = shop.login(username, password)?;
    Ok(format!("{}\nnext: {target}", shop.current_user().label()))
}

/// Log out.
///
/// # Errors
///
/// Returns the `AuthError` when the session cannot be cleared.
pub fn logout<S, N>(shop: &Shop<'_, S, N>) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    shop.logout()?;
    Ok(shop.current_user().label())
}

/// Show who is logged in.
pub fn whoami<S, N>(shop: &Shop<'_, S, N>) -> String
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    shop.current_user().label()
}
