//! Integration tests for signup, login and the deferred login redirect.

#![allow(clippy::unwrap_used)]

use tidepool_core::PageTarget;
use tidepool_integration_tests::TestContext;
use tidepool_storefront::models::CurrentUser;
use tidepool_storefront::notify::NoticeKind;
use tidepool_storefront::services::{AuthError, CartError};

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_trimmed_usernames_are_unique() {
    let ctx = TestContext::new();
    assert!(ctx.shop().register("marina", "reef").is_ok());

    let err = ctx.shop().register("  marina ", "other").unwrap_err();
    assert!(matches!(err, AuthError::DuplicateAccount(ref name) if name == "marina"));

    let notice = ctx.notifier.last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Signup Failed");
}

#[test]
fn test_usernames_are_case_sensitive() {
    let ctx = TestContext::new();
    ctx.shop().register("Marina", "reef").unwrap();
    assert!(ctx.shop().register("marina", "reef").is_ok());
}

#[test]
fn test_blank_fields_rejected() {
    let ctx = TestContext::new();
    assert!(matches!(
        ctx.shop().register("   ", "reef"),
        Err(AuthError::MissingFields)
    ));
    assert!(matches!(
        ctx.shop().register("marina", ""),
        Err(AuthError::MissingFields)
    ));
    assert_eq!(ctx.notifier.last().unwrap().message, "Please fill all fields");
    assert!(ctx.raw("users").is_none());
}

#[test]
fn test_password_stored_verbatim() {
    let ctx = TestContext::new();
    ctx.shop().register("marina", " reef ").unwrap();
    assert_eq!(ctx.raw("users").unwrap(), r#"{"marina":" reef "}"#);

    assert!(matches!(
        ctx.shop().login("marina", "reef"),
        Err(AuthError::BadCredentials)
    ));
    assert!(ctx.shop().login("marina", " reef ").is_ok());
}

// =============================================================================
// Login / Logout
// =============================================================================

#[test]
fn test_login_requires_exact_password() {
    let ctx = TestContext::new();
    ctx.shop().register("marina", "Reef").unwrap();

    assert!(matches!(
        ctx.shop().login("ghost", "Reef"),
        Err(AuthError::AccountNotFound)
    ));
    assert!(matches!(
        ctx.shop().login("marina", "reef"),
        Err(AuthError::BadCredentials)
    ));
    assert_eq!(ctx.shop().current_user(), CurrentUser::Guest);

    let target = ctx.shop().login(" marina", "Reef").unwrap();
    assert_eq!(target, PageTarget::default_landing());
    assert_eq!(ctx.shop().current_user().label(), "👤 marina");
}

#[test]
fn test_logout_is_idempotent() {
    let ctx = TestContext::logged_in("marina");
    ctx.shop().logout().unwrap();
    ctx.shop().logout().unwrap();
    assert_eq!(ctx.shop().current_user(), CurrentUser::Guest);
    assert!(ctx.raw("loggedInUser").is_none());
}

#[test]
fn test_logout_keeps_cart() {
    let ctx = TestContext::logged_in("marina");
    ctx.shop()
        .add_item("Guppy", tidepool_core::Price::from_units(35))
        .unwrap();
    ctx.shop().logout().unwrap();
    assert_eq!(ctx.shop().cart().len(), 1);
}

// =============================================================================
// Deferred Redirect
// =============================================================================

#[test]
fn test_redirect_resumed_once() {
    let ctx = TestContext::new();
    let shop = ctx.shop().with_return_to(PageTarget::new("product.html?id=koi"));
    assert!(matches!(shop.checkout(), Err(CartError::AuthRequired)));
    assert_eq!(
        ctx.raw("redirectAfterLogin").as_deref(),
        Some(r#""product.html?id=koi""#)
    );

    ctx.shop().register("marina", "reef").unwrap();
    let target = ctx.shop().login("marina", "reef").unwrap();
    assert_eq!(target.as_str(), "product.html?id=koi");
    assert!(ctx.raw("redirectAfterLogin").is_none());

    ctx.shop().logout().unwrap();
    let target = ctx.shop().login("marina", "reef").unwrap();
    assert_eq!(target, PageTarget::default_landing());
}

#[test]
fn test_failed_login_keeps_redirect() {
    let ctx = TestContext::new();
    let _ = ctx.shop().add_item("Koi", tidepool_core::Price::from_units(1500));
    ctx.shop().register("marina", "reef").unwrap();

    assert!(ctx.shop().login("marina", "wrong").is_err());
    assert!(ctx.raw("redirectAfterLogin").is_some());
}
