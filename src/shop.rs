//! Shop
//!
//! The facade the presentation layer talks to: one explicit state object
//! bundling the catalog, the user directory, the session, and the session's
//! cart. Every cart and checkout operation is gated behind a login.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    auth::{AuthError, Session, UserDirectory},
    cart::{Cart, CartError, LineItem},
    catalog::Catalog,
    checkout::{self, CheckoutError, Invoice},
    products::ProductId,
};

/// Errors surfaced by the shop facade.
#[derive(Debug, Error)]
pub enum ShopError {
    /// No user is logged in.
    #[error("No user is logged in")]
    Unauthenticated,

    /// The product id is not in the catalog.
    #[error("Unknown product id {0}")]
    UnknownProduct(ProductId),

    /// Signup or login failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Cart mutation or totalling failure.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Invoice computation failure.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Shop
///
/// Owns all process state. There is exactly one cart, belonging to whichever
/// user the session currently holds, matching the single-user scope.
#[derive(Debug)]
pub struct Shop<'a> {
    catalog: Catalog<'a>,
    users: UserDirectory,
    session: Session,
    cart: Cart,
}

impl<'a> Shop<'a> {
    /// Create a shop around an existing catalog, with no users and an empty cart.
    #[must_use]
    pub fn new(catalog: Catalog<'a>) -> Self {
        let currency = catalog.currency();

        Shop {
            catalog,
            users: UserDirectory::new(),
            session: Session::new(),
            cart: Cart::new(currency),
        }
    }

    /// Create a shop with the fixed seeded catalog.
    #[must_use]
    pub fn seeded() -> Shop<'static> {
        Shop::new(Catalog::seeded())
    }

    /// The product catalog. Browsing requires no login.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The current cart contents; read-only.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError::Auth`] wrapping the signup failure.
    pub fn signup(&mut self, username: &str, password: &str) -> Result<(), ShopError> {
        self.users.signup(username, password)?;

        Ok(())
    }

    /// Log a user in, making them the session's current user.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError::Auth`] wrapping the credential failure.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ShopError> {
        self.session.login(&self.users, username, password)?;

        Ok(())
    }

    /// Log the current user out. Idempotent.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The currently logged-in username, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.session.current()
    }

    fn require_login(&self) -> Result<&str, ShopError> {
        self.session.current().ok_or(ShopError::Unauthenticated)
    }

    /// Add `quantity` of a product to the cart by public id.
    ///
    /// # Errors
    ///
    /// - [`ShopError::Unauthenticated`]: no user is logged in.
    /// - [`ShopError::UnknownProduct`]: the id is not in the catalog.
    /// - [`ShopError::Cart`]: the quantity was zero.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Result<(), ShopError> {
        self.require_login()?;

        let key = self
            .catalog
            .key_of(id)
            .ok_or(ShopError::UnknownProduct(id))?;

        self.cart.add(key, quantity)?;

        Ok(())
    }

    /// Decrement a product's cart quantity by one, by public id.
    ///
    /// An id that is not in the catalog or not in the cart is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] when no user is logged in.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), ShopError> {
        self.require_login()?;

        match self.catalog.key_of(id) {
            Some(key) => self.cart.remove(key),
            None => debug!(%id, "remove for unknown product id ignored"),
        }

        Ok(())
    }

    /// The cart resolved for display, in first-add order.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] when no user is logged in, or a
    /// [`ShopError::Cart`] when an entry cannot be resolved.
    pub fn view_cart(&self) -> Result<Vec<LineItem<'_>>, ShopError> {
        self.require_login()?;

        Ok(self.cart.line_items(&self.catalog)?)
    }

    /// The cart total.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] when no user is logged in, or a
    /// [`ShopError::Cart`] when totalling fails.
    pub fn cart_total(&self) -> Result<Money<'_, Currency>, ShopError> {
        self.require_login()?;

        Ok(self.cart.total(&self.catalog)?)
    }

    /// Compute an invoice for the current user and cart.
    ///
    /// Never mutates the cart; call [`Shop::confirm_payment`] to finalize.
    ///
    /// # Errors
    ///
    /// - [`ShopError::Unauthenticated`]: no user is logged in.
    /// - [`ShopError::Checkout`]: the cart is empty or cannot be resolved.
    pub fn checkout(&self) -> Result<Invoice<'_>, ShopError> {
        let customer = self.require_login()?;

        Ok(Invoice::compute(&self.cart, &self.catalog, customer)?)
    }

    /// Confirm payment, clearing the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] when no user is logged in.
    pub fn confirm_payment(&mut self) -> Result<(), ShopError> {
        self.require_login()?;

        checkout::confirm(&mut self.cart);

        Ok(())
    }
}
