//! Storefront session controller.
//!
//! [`Shop`] is what UI events call. It borrows the storage substrate and the
//! notifier for the duration of one event, runs the account or cart operation,
//! and turns every outcome into a notice. Errors are still returned so the
//! front end can decide where to navigate, but none of them are fatal.
//!
//! A gated action attempted by a guest stores the shop's return page as the
//! redirect target; the front end then sends the user to
//! [`PageTarget::LOGIN`], and the next successful login resumes there.

use tracing::instrument;

use tidepool_core::{Cart, PageTarget, Price};

use super::auth::{AuthError, AuthService};
use super::cart::{CartError, CartService};
use crate::models::{CartView, CurrentUser};
use crate::notify::{Notice, Notifier};
use crate::store::{KeyValueStore, SessionRepository};

/// Message shown when storage fails underneath an operation.
const STORAGE_FAILURE: &str = "Something went wrong. Please try again.";

/// Storefront controller for one UI event.
pub struct Shop<'a, S: ?Sized, N: ?Sized> {
    store: &'a S,
    notifier: &'a N,
    return_to: PageTarget,
}

impl<'a, S, N> Shop<'a, S, N>
where
    S: KeyValueStore + ?Sized,
    N: Notifier + ?Sized,
{
    /// Create a controller that sends users back to the default landing page
    /// after a forced login.
    #[must_use]
    pub fn new(store: &'a S, notifier: &'a N) -> Self {
        Self {
            store,
            notifier,
            return_to: PageTarget::default_landing(),
        }
    }

    /// Override the page a forced login resumes at.
    #[must_use]
    pub fn with_return_to(mut self, target: PageTarget) -> Self {
        self.return_to = target;
        self
    }

    fn auth(&self) -> AuthService<'a, S> {
        AuthService::new(self.store)
    }

    fn carts(&self) -> CartService<'a, S> {
        CartService::new(self.store)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Sign up. On success the front end shows the login form.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` after it has been reported.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<PageTarget, AuthError> {
        match self.auth().register(username, password) {
            Ok(_) => {
                self.notify(Notice::success("Account created! Please login ✅", "Success"));
                Ok(PageTarget::after_signup())
            }
            Err(e) => {
                self.notify(match &e {
                    AuthError::MissingFields => Notice::warn("Please fill all fields", "Warning"),
                    AuthError::DuplicateAccount(_) => {
                        Notice::error("Username already exists ❌", "Signup Failed")
                    }
                    _ => storage_failure(&e),
                });
                Err(e)
            }
        }
    }

    /// Log in. Returns the page to navigate to.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` after it has been reported.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<PageTarget, AuthError> {
        match self.auth().login(username, password) {
            Ok((_, target)) => Ok(target),
            Err(e) => {
                self.notify(match &e {
                    AuthError::MissingFields => Notice::warn("Please fill all fields", "Warning"),
                    AuthError::AccountNotFound => {
                        Notice::error("Account does not exist ❌", "Login Failed")
                    }
                    AuthError::BadCredentials => {
                        Notice::error("Incorrect password ❌", "Login Failed")
                    }
                    _ => storage_failure(&e),
                });
                Err(e)
            }
        }
    }

    /// Log out. Safe to call as a guest.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` after it has been reported.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.auth().logout().inspect_err(|e| {
            self.notify(storage_failure(e));
        })
    }

    /// The current session identity, or `Guest`.
    #[must_use]
    pub fn current_user(&self) -> CurrentUser {
        self.auth().current_user()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The persisted cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.carts().cart()
    }

    /// The cart modal's contents.
    #[must_use]
    pub fn view_cart(&self) -> CartView {
        CartView::from(&self.cart())
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest, after storing the
    /// redirect target; other errors after they have been reported.
    #[instrument(skip(self))]
    pub fn add_item(&self, name: &str, price: Price) -> Result<(), CartError> {
        match self.carts().add_item(name, price) {
            Ok(_) => {
                self.notify(Notice::success(format!("{name} added to cart 🛒"), "Added"));
                Ok(())
            }
            Err(e @ CartError::TotalTooLarge(_)) => {
                tracing::warn!(error = %e, item = name, "Refusing add");
                self.notify(Notice::warn("Cart total is too large to add this item", "Cart"));
                Err(e)
            }
            Err(e) => Err(self.cart_failure(e, "Please login to add items 🔐", "Login Required")),
        }
    }

    /// Remove the line at `index` and return the re-rendered cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NoSuchLine` for a stale index; nothing is shown
    /// since the cart view is simply re-rendered.
    #[instrument(skip(self))]
    pub fn remove_item(&self, index: usize) -> Result<CartView, CartError> {
        match self.carts().remove_item(index) {
            Ok(_) => Ok(self.view_cart()),
            Err(e @ CartError::NoSuchLine { .. }) => {
                tracing::debug!(error = %e, "Ignoring stale cart index");
                Err(e)
            }
            Err(e) => {
                self.notify(storage_failure(&e));
                Err(e)
            }
        }
    }

    /// Check out: clear the cart. No order is recorded.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest, after storing the
    /// redirect target; `CartError::EmptyCart` and others after they have
    /// been reported.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<(), CartError> {
        match self.carts().checkout() {
            Ok(_) => {
                self.notify(Notice::success("Checkout successful 🐠", "Thank You"));
                Ok(())
            }
            Err(CartError::EmptyCart) => {
                self.notify(Notice::warn("Your cart is empty", "Cart"));
                Err(CartError::EmptyCart)
            }
            Err(e) => Err(self.cart_failure(e, "Login required 🔐", "Checkout")),
        }
    }

    /// Buy a single product immediately, after confirmation. The cart is not
    /// touched.
    ///
    /// Returns whether the purchase was confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest, after storing the
    /// redirect target.
    #[instrument(skip(self))]
    pub fn buy_now(&self, name: &str, price: Price) -> Result<bool, CartError> {
        if let Err(e) = self.carts().require_user() {
            return Err(self.cart_failure(e, "Please login to continue 🔐", "Login Required"));
        }

        let prompt = format!("Buy \"{name}\" for {}?", price.display());
        if !self.notifier.confirm(&prompt) {
            tracing::debug!(item = name, "Purchase declined");
            return Ok(false);
        }

        tracing::info!(item = name, price = %price, "Purchase confirmed");
        self.notify(Notice::success(
            format!("Thank you for buying {name} 🐟"),
            "Purchase Complete",
        ));
        Ok(true)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Report a cart failure. `AuthRequired` shows the given login prompt and
    /// stores the redirect target.
    fn cart_failure(&self, error: CartError, login_message: &str, login_title: &str) -> CartError {
        match &error {
            CartError::AuthRequired => {
                self.notify(Notice::error(login_message, login_title));
                self.remember_return_page();
            }
            _ => self.notify(storage_failure(&error)),
        }
        error
    }

    fn remember_return_page(&self) {
        if let Err(e) = SessionRepository::new(self.store).set_redirect(&self.return_to) {
            tracing::error!(error = %e, "Failed to store redirect target");
        }
    }
}

/// Log a storage-level failure and build the generic error notice for it.
fn storage_failure(error: &impl std::error::Error) -> Notice {
    tracing::error!(error = %error, "Storefront operation failed");
    Notice::error(STORAGE_FAILURE, "Error")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::keys;
    use crate::notify::{CollectingNotifier, NoticeKind};
    use crate::store::MemoryStore;

    fn logged_in(store: &MemoryStore) {
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(store, &notifier);
        shop.register("marlin", "nemo").unwrap();
        shop.login("marlin", "nemo").unwrap();
    }

    #[test]
    fn test_register_notices() {
        let store = MemoryStore::new();
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier);

        assert_eq!(shop.register("marlin", "nemo").unwrap(), PageTarget::after_signup());
        assert_eq!(notifier.last().unwrap().title, "Success");

        assert!(shop.register("marlin", "x").is_err());
        assert_eq!(notifier.last().unwrap().message, "Username already exists ❌");

        assert!(shop.register("", "x").is_err());
        assert_eq!(notifier.last().unwrap().kind, NoticeKind::Warn);
    }

    #[test]
    fn test_login_failure_notices() {
        let store = MemoryStore::new();
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier);
        shop.register("marlin", "nemo").unwrap();

        assert!(shop.login("gill", "nemo").is_err());
        assert_eq!(notifier.last().unwrap().message, "Account does not exist ❌");

        assert!(shop.login("marlin", "Nemo").is_err());
        assert_eq!(notifier.last().unwrap().message, "Incorrect password ❌");
    }

    #[test]
    fn test_guest_add_stores_redirect() {
        let store = MemoryStore::new();
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier).with_return_to(PageTarget::new("products.html"));

        assert!(matches!(
            shop.add_item("Tang", Price::from_units(10)),
            Err(CartError::AuthRequired)
        ));
        let notice = notifier.last().unwrap();
        assert_eq!(notice.message, "Please login to add items 🔐");
        assert_eq!(notice.title, "Login Required");
        assert!(store.get(keys::CART).unwrap().is_none());

        shop.register("marlin", "nemo").unwrap();
        assert_eq!(
            shop.login("marlin", "nemo").unwrap(),
            PageTarget::new("products.html")
        );
    }

    #[test]
    fn test_add_and_view() {
        let store = MemoryStore::new();
        logged_in(&store);
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier);

        shop.add_item("Tang", Price::from_units(10)).unwrap();
        assert_eq!(notifier.last().unwrap().message, "Tang added to cart 🛒");
        shop.add_item("Tang", Price::from_units(10)).unwrap();

        let view = shop.view_cart();
        assert_eq!(view.total, "Total: ₱20");

        let view = shop.remove_item(0).unwrap();
        assert!(view.empty_message.is_some());
        assert!(shop.remove_item(0).is_err());
    }

    #[test]
    fn test_add_past_price_range_warns() {
        let store = MemoryStore::new();
        logged_in(&store);
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier);
        let huge = Price::parse_label("50,000,000,000,000,000,000,000,000,000").unwrap();

        shop.add_item("Whale Shark", huge).unwrap();
        assert!(matches!(
            shop.add_item("Whale Shark", huge),
            Err(CartError::TotalTooLarge(_))
        ));

        let notice = notifier.last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warn);
        assert_eq!(notice.title, "Cart");
        assert_eq!(shop.cart().get("Whale Shark").unwrap().quantity.get(), 1);
    }

    #[test]
    fn test_checkout_notices() {
        let store = MemoryStore::new();
        logged_in(&store);
        let notifier = CollectingNotifier::new();
        let shop = Shop::new(&store, &notifier);

        assert!(matches!(shop.checkout(), Err(CartError::EmptyCart)));
        assert_eq!(notifier.last().unwrap().message, "Your cart is empty");

        shop.add_item("Tang", Price::from_units(10)).unwrap();
        shop.checkout().unwrap();
        assert_eq!(notifier.last().unwrap().message, "Checkout successful 🐠");
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_buy_now_confirmation() {
        let store = MemoryStore::new();
        logged_in(&store);

        let declining = CollectingNotifier::answering(false);
        let shop = Shop::new(&store, &declining);
        assert!(!shop.buy_now("Koi", Price::from_units(900)).unwrap());
        assert_eq!(declining.prompts(), vec!["Buy \"Koi\" for ₱900?".to_string()]);
        assert!(declining.notices().is_empty());

        let accepting = CollectingNotifier::answering(true);
        let shop = Shop::new(&store, &accepting);
        assert!(shop.buy_now("Koi", Price::from_units(900)).unwrap());
        assert_eq!(
            accepting.last().unwrap().message,
            "Thank you for buying Koi 🐟"
        );
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_guest_buy_now_never_confirms() {
        let store = MemoryStore::new();
        let notifier = CollectingNotifier::answering(true);
        let shop = Shop::new(&store, &notifier);

        assert!(matches!(
            shop.buy_now("Koi", Price::from_units(900)),
            Err(CartError::AuthRequired)
        ));
        assert!(notifier.prompts().is_empty());
        assert_eq!(notifier.last().unwrap().message, "Please login to continue 🔐");
    }
}
