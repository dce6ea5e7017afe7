//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Public product identifier, stable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a new product id.
    #[must_use]
    pub fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Public product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Creates a new product.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};

    use super::*;

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::new(7).to_string(), "7");
    }

    #[test]
    fn product_id_round_trips_through_value() {
        let id = ProductId::from(42);

        assert_eq!(id.value(), 42);
    }

    #[test]
    fn new_product_keeps_fields() {
        let product = Product::new(ProductId::new(1), "Notebook", Money::from_major(50, INR));

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Notebook");
        assert_eq!(product.price, Money::from_major(50, INR));
    }
}
