//! Integration test for signup, login, and session gating.
//!
//! The shop refuses every cart and checkout operation until a user has
//! logged in, and again after logout. Credentials are exact-match: no case
//! folding, no whitespace trimming.

use testresult::TestResult;

use kiosk::{auth::AuthError, products::ProductId, shop::Shop, shop::ShopError};

#[test]
fn signup_collision_and_successful_login() -> TestResult {
    let mut shop = Shop::seeded();

    shop.signup("asha", "secret")?;

    match shop.signup("asha", "different") {
        Err(ShopError::Auth(AuthError::AlreadyExists(name))) => assert_eq!(name, "asha"),
        other => panic!("expected AlreadyExists error, got {other:?}"),
    }

    shop.login("asha", "secret")?;

    assert_eq!(shop.current_user(), Some("asha"));

    Ok(())
}

#[test]
fn login_failures_leave_the_session_unset() -> TestResult {
    let mut shop = Shop::seeded();

    shop.signup("asha", "secret")?;

    assert!(matches!(
        shop.login("asha", "SECRET"),
        Err(ShopError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        shop.login("unknown", "secret"),
        Err(ShopError::Auth(AuthError::InvalidCredentials))
    ));
    assert_eq!(shop.current_user(), None);

    Ok(())
}

#[test]
fn cart_and_checkout_are_gated_by_the_session() -> TestResult {
    let mut shop = Shop::seeded();

    shop.signup("asha", "secret")?;

    assert!(matches!(
        shop.add_to_cart(ProductId::new(1), 1),
        Err(ShopError::Unauthenticated)
    ));

    shop.login("asha", "secret")?;
    shop.add_to_cart(ProductId::new(1), 1)?;

    shop.logout();

    assert!(matches!(shop.view_cart(), Err(ShopError::Unauthenticated)));
    assert!(matches!(shop.cart_total(), Err(ShopError::Unauthenticated)));
    assert!(matches!(shop.checkout(), Err(ShopError::Unauthenticated)));
    assert!(matches!(
        shop.confirm_payment(),
        Err(ShopError::Unauthenticated)
    ));

    // The cart itself survives a logout; it belongs to the process, not the
    // session, in the single-user scope.
    shop.login("asha", "secret")?;

    assert_eq!(shop.view_cart()?.len(), 1);

    Ok(())
}

#[test]
fn logout_is_idempotent_and_relogin_switches_users() -> TestResult {
    let mut shop = Shop::seeded();

    shop.signup("asha", "secret")?;
    shop.signup("ravi", "hunter2")?;

    shop.login("asha", "secret")?;
    shop.logout();
    shop.logout();

    assert_eq!(shop.current_user(), None);

    shop.login("ravi", "hunter2")?;

    assert_eq!(shop.current_user(), Some("ravi"));

    let invoice_customer = {
        let mut shop_with_items = Shop::seeded();

        shop_with_items.signup("ravi", "hunter2")?;
        shop_with_items.login("ravi", "hunter2")?;
        shop_with_items.add_to_cart(ProductId::new(2), 1)?;

        shop_with_items.checkout()?.customer().to_string()
    };

    assert_eq!(invoice_customer, "ravi");

    Ok(())
}
