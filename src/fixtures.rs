//! Fixtures
//!
//! YAML catalog fixtures for demos and tests. A fixture file looks like:
//!
//! ```yaml
//! products:
//!   notebook:
//!     id: 1
//!     name: Notebook
//!     price: "50.00 INR"
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Product, ProductId},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Fixture contains no products
    #[error("Fixture contains no products; currency unknown")]
    Empty,

    /// Catalog construction error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One product row in a catalog fixture file.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Public product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Price string with a currency code, e.g. `"50.00 INR"`
    pub price: String,
}

/// A catalog fixture file: products keyed by a human-readable slug.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products keyed by slug
    pub products: FxHashMap<String, ProductFixture>,
}

impl CatalogFixture {
    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] when the text is not a valid fixture.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Build a catalog from the fixture.
    ///
    /// Products are inserted in ascending id order so the catalog's display
    /// order is deterministic regardless of map iteration order. The catalog
    /// currency is taken from the first product.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] when the fixture is empty, a price cannot
    /// be parsed, or the catalog rejects a product.
    pub fn into_catalog(self) -> Result<Catalog<'static>, FixtureError> {
        let mut rows: Vec<ProductFixture> = self.products.into_values().collect();

        rows.sort_by_key(|row| row.id);

        let first = rows.first().ok_or(FixtureError::Empty)?;
        let (_, currency) = parse_price(&first.price)?;

        let mut catalog = Catalog::new(currency);

        for row in rows {
            let (amount, row_currency) = parse_price(&row.price)?;
            let product = Product::new(
                ProductId::new(row.id),
                row.name,
                Money::from_decimal(amount, row_currency),
            );

            catalog.insert(product)?;
        }

        Ok(catalog)
    }
}

/// Parse a price string like `"50.00 INR"` into an amount and a currency.
///
/// # Errors
///
/// - [`FixtureError::InvalidPrice`]: the string is not `<amount> <code>`.
/// - [`FixtureError::UnknownCurrency`]: the code is not an ISO currency.
pub fn parse_price(price: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let mut parts = price.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(price.to_string()));
    };

    let amount: Decimal = amount
        .parse()
        .map_err(|_err| FixtureError::InvalidPrice(price.to_string()))?;

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((amount, currency))
}
