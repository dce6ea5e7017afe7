//! Cart

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{catalog::Catalog, products::ProductKey};

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// The add quantity was not at least one.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// A cart entry references a product missing from the catalog.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single cart line: one product and how many of it.
///
/// At most one entry exists per product; adds for an existing product merge
/// into it. The entry holds only the product handle, never copies of the
/// product's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry {
    product: ProductKey,
    quantity: u32,
}

impl CartEntry {
    fn new(product: ProductKey, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product handle for this entry.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Returns the quantity of this entry, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A cart entry resolved against the catalog for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    /// Product name
    pub name: String,

    /// Quantity in the cart
    pub quantity: u32,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Quantity times unit price
    pub line_total: Money<'a, Currency>,
}

/// Cart
///
/// Entries are kept in first-add order. Prices are resolved through a
/// borrowed [`Catalog`] at read time, so reading the cart never mutates it
/// and the cart never owns product data.
#[derive(Debug)]
pub struct Cart {
    entries: Vec<CartEntry>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            entries: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of a product, merging into an existing entry when one
    /// is present and appending a new entry otherwise.
    ///
    /// A rejected add leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `quantity` is zero.
    pub fn add(&mut self, product: ProductKey, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.product == product) {
            entry.quantity = entry.quantity.saturating_add(quantity);
        } else {
            self.entries.push(CartEntry::new(product, quantity));
        }

        debug!(?product, quantity, "added to cart");

        Ok(())
    }

    /// Decrement a product's quantity by exactly one, deleting the entry when
    /// it reaches zero.
    ///
    /// A product that is not in the cart is a silent no-op, not an error.
    pub fn remove(&mut self, product: ProductKey) {
        let Some(idx) = self.entries.iter().position(|e| e.product == product) else {
            return;
        };

        let emptied = match self.entries.get_mut(idx) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_sub(1);
                entry.quantity == 0
            }
            None => false,
        };

        if emptied {
            self.entries.remove(idx);
        }

        debug!(?product, "removed one from cart");
    }

    /// Resolve the cart entries against the catalog, in first-add order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingProduct`] when an entry's product is no
    /// longer in the catalog.
    pub fn line_items<'a>(&self, catalog: &'a Catalog<'a>) -> Result<Vec<LineItem<'a>>, CartError> {
        self.entries
            .iter()
            .map(|entry| {
                let product = catalog
                    .resolve(entry.product)
                    .ok_or(CartError::MissingProduct(entry.product))?;

                let line_total = Money::from_minor(
                    product.price.to_minor_units() * i64::from(entry.quantity),
                    self.currency,
                );

                Ok(LineItem {
                    name: product.name.clone(),
                    quantity: entry.quantity,
                    unit_price: product.price,
                    line_total,
                })
            })
            .collect()
    }

    /// Calculate the total of the cart: the sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an entry cannot be resolved or money
    /// arithmetic fails.
    pub fn total<'a>(&self, catalog: &'a Catalog<'a>) -> Result<Money<'a, Currency>, CartError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        self.line_items(catalog)?
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.line_total)?)
            })
    }

    /// Remove all entries, returning the cart to its empty state.
    pub fn clear(&mut self) {
        self.entries.clear();

        debug!("cart cleared");
    }

    /// Returns the quantity in the cart for a product, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, product: ProductKey) -> u32 {
        self.entries
            .iter()
            .find(|e| e.product == product)
            .map_or(0, CartEntry::quantity)
    }

    /// Iterate over the entries in first-add order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Get the number of distinct entries in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
