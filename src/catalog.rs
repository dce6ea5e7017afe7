//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductId, ProductKey};

/// The fixed product list seeded into every default catalog, in rupees.
const SEED_PRODUCTS: [(u32, &str, i64); 10] = [
    (1, "Notebook", 50),
    (2, "Stationery Kit", 200),
    (3, "Sticky Notes", 60),
    (4, "Scientific Calculator", 1100),
    (5, "Noise-cancelling Headphones", 2500),
    (6, "Study Lamp", 1000),
    (7, "Study Chair", 3700),
    (8, "Backpack", 1500),
    (9, "Whiteboard", 700),
    (10, "Highlighter Pens", 25),
];

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product id was inserted twice.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product name was empty.
    #[error("Product {0} has an empty name")]
    EmptyName(ProductId),

    /// A product's currency differs from the catalog currency (id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Catalog
///
/// An insertion-ordered product store. Products are immutable once inserted;
/// lookups go either through the public [`ProductId`] or the internal
/// [`ProductKey`] handle.
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    ids: FxHashMap<ProductId, ProductKey>,
    order: Vec<ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: SlotMap::with_key(),
            ids: FxHashMap::default(),
            order: Vec::new(),
            currency,
        }
    }

    /// Create the fixed ten-product stationery catalog, priced in INR.
    ///
    /// Deterministic: every call returns the same products in the same order.
    #[must_use]
    pub fn seeded() -> Catalog<'static> {
        let mut catalog = Catalog::new(INR);

        for (id, name, rupees) in &SEED_PRODUCTS {
            let id = ProductId::new(*id);
            let product = Product::new(id, *name, Money::from_major(*rupees, INR));

            let key = catalog.products.insert(product);
            catalog.ids.insert(id, key);
            catalog.order.push(key);
        }

        catalog
    }

    /// Insert a product, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the id is already taken, the name is
    /// empty, or the price currency differs from the catalog currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if product.name.is_empty() {
            return Err(CatalogError::EmptyName(product.id));
        }

        let product_currency = product.price.currency();
        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        let id = product.id;
        let key = self.products.insert(product);

        self.ids.insert(id, key);
        self.order.push(key);

        Ok(key)
    }

    /// Look up a product by its public id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        self.ids.get(&id).and_then(|key| self.products.get(*key))
    }

    /// Look up the internal key for a public id.
    #[must_use]
    pub fn key_of(&self, id: ProductId) -> Option<ProductKey> {
        self.ids.get(&id).copied()
    }

    /// Resolve an internal key back to its product.
    #[must_use]
    pub fn resolve(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Iterate over the products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn seeded_catalog_has_ten_products_in_order() {
        let catalog = Catalog::seeded();

        assert_eq!(catalog.len(), 10);

        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names.first().copied(), Some("Notebook"));
        assert_eq!(names.last().copied(), Some("Highlighter Pens"));
    }

    #[test]
    fn seeded_catalog_is_deterministic() {
        let first: Vec<(ProductId, i64)> = Catalog::seeded()
            .iter()
            .map(|p| (p.id, p.price.to_minor_units()))
            .collect();

        let second: Vec<(ProductId, i64)> = Catalog::seeded()
            .iter()
            .map(|p| (p.id, p.price.to_minor_units()))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn get_by_id_returns_the_product() {
        let catalog = Catalog::seeded();

        let product = catalog.get(ProductId::new(4));

        assert_eq!(product.map(|p| p.name.as_str()), Some("Scientific Calculator"));
    }

    #[test]
    fn get_unknown_id_returns_none() {
        let catalog = Catalog::seeded();

        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn key_of_resolves_back_to_the_same_product() -> TestResult {
        let catalog = Catalog::seeded();

        let key = catalog.key_of(ProductId::new(2)).expect("missing key");
        let product = catalog.resolve(key).expect("missing product");

        assert_eq!(product.id, ProductId::new(2));

        Ok(())
    }

    #[test]
    fn insert_duplicate_id_errors() {
        let mut catalog = Catalog::seeded();

        let result = catalog.insert(Product::new(
            ProductId::new(1),
            "Another Notebook",
            Money::from_major(10, INR),
        ));

        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)));
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn insert_empty_name_errors() {
        let mut catalog = Catalog::new(INR);

        let result = catalog.insert(Product::new(ProductId::new(1), "", Money::from_major(10, INR)));

        assert!(matches!(result, Err(CatalogError::EmptyName(_))));
    }

    #[test]
    fn insert_currency_mismatch_errors() {
        let mut catalog = Catalog::new(INR);

        let result = catalog.insert(Product::new(
            ProductId::new(1),
            "Imported Pen",
            Money::from_major(10, USD),
        ));

        match result {
            Err(CatalogError::CurrencyMismatch(id, product_currency, catalog_currency)) => {
                assert_eq!(id, ProductId::new(1));
                assert_eq!(product_currency, USD.iso_alpha_code);
                assert_eq!(catalog_currency, INR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }
}
