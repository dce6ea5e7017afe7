//! Catalog Demo
//!
//! Prints the product catalog as a table.
//!
//! Use `-f` to load a catalog fixture file instead of the seeded catalog

use anyhow::Result;
use clap::Parser;
use kiosk::{catalog::Catalog, fixtures::CatalogFixture, utils::DemoShopArgs};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Catalog Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoShopArgs::parse();

    let catalog = match args.fixture.as_deref() {
        Some(path) => CatalogFixture::load(path)?.into_catalog()?,
        None => Catalog::seeded(),
    };

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format!("{}", product.price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    println!("{table}");

    Ok(())
}
