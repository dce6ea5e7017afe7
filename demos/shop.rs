//! Shop Demo
//!
//! Walks the full flow once: signup, login, add and remove items, print the
//! cart, print the invoice, confirm payment.
//!
//! Use `-f` to load a catalog fixture file instead of the seeded catalog
//! Use `-u` to pick the demo username

use std::io;

use anyhow::Result;
use clap::Parser;
use kiosk::{
    catalog::Catalog, fixtures::CatalogFixture, products::ProductId, shop::Shop,
    utils::DemoShopArgs,
};

/// Shop Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DemoShopArgs::parse();

    let catalog = match args.fixture.as_deref() {
        Some(path) => CatalogFixture::load(path)?.into_catalog()?,
        None => Catalog::seeded(),
    };

    let mut shop = Shop::new(catalog);

    shop.signup(&args.user, "demo-password")?;
    shop.login(&args.user, "demo-password")?;

    shop.add_to_cart(ProductId::new(1), 2)?;
    shop.add_to_cart(ProductId::new(1), 3)?;
    shop.add_to_cart(ProductId::new(10), 4)?;
    shop.remove_from_cart(ProductId::new(10))?;

    println!("Cart for {}:", args.user);

    for line in shop.view_cart()? {
        println!("  {} x {} = {}", line.name, line.quantity, line.line_total);
    }

    println!("Cart total: {}\n", shop.cart_total()?);

    {
        let invoice = shop.checkout()?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();

        invoice.write_to(&mut handle)?;
    }

    shop.confirm_payment()?;

    println!("\nPayment successful! Thank you for shopping.");

    Ok(())
}
