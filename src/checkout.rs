//! Checkout

use std::io;

use chrono::{DateTime, Local};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartError, LineItem},
    catalog::Catalog,
};

/// Tax rate applied to every invoice, as a fraction.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.18)
}

/// Errors that can occur while computing or writing an invoice.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items to invoice.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Error resolving cart lines or totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error writing the invoice.
    #[error("Failed to write invoice: {0}")]
    Io(#[from] io::Error),
}

/// Final invoice for a cart at checkout time.
///
/// A computed view over the cart: building one never mutates the cart, so it
/// can be re-viewed any number of times before [`confirm`] is called. Never
/// stored anywhere.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    lines: SmallVec<[LineItem<'a>; 10]>,
    subtotal: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    total: Money<'a, Currency>,
    customer: String,
    issued_at: DateTime<Local>,
}

impl<'a> Invoice<'a> {
    /// Compute an invoice from the current cart contents.
    ///
    /// The tax is rounded to two decimal places on its own, and the grand
    /// total re-rounds the sum of the exact subtotal and the rounded tax.
    /// Both roundings are midpoint-nearest-even.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no items.
    /// - [`CheckoutError::Cart`]: a cart entry could not be resolved.
    pub fn compute(
        cart: &Cart,
        catalog: &'a Catalog<'a>,
        customer: impl Into<String>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines: SmallVec<[LineItem<'a>; 10]> = cart.line_items(catalog)?.into_iter().collect();
        let subtotal = cart.total(catalog)?;
        let currency = subtotal.currency();

        let tax_amount = (tax_rate() * *subtotal.amount()).round_dp(2);
        let total_amount = (*subtotal.amount() + tax_amount).round_dp(2);

        let customer = customer.into();

        info!(%customer, %subtotal, "invoice computed");

        Ok(Self {
            lines,
            subtotal,
            tax: Money::from_decimal(tax_amount, currency),
            total: Money::from_decimal(total_amount, currency),
            customer,
            issued_at: Local::now(),
        })
    }

    /// Invoice rows, in the cart's first-add order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Cart total before tax.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Tax amount, rounded to two decimal places.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Grand total to pay.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Name of the customer the invoice was issued to.
    #[must_use]
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// When the invoice was computed.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Local> {
        self.issued_at
    }

    /// Write the invoice to the given sink as a table plus a summary block.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CheckoutError> {
        writeln!(out, "Invoice")?;
        writeln!(out, "Customer: {}", self.customer)?;
        writeln!(out, "Date: {}", self.issued_at.format("%d-%m-%Y %H:%M:%S"))?;

        let mut builder = Builder::default();

        builder.push_record(["Product", "Qty", "Price", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}")?;

        writeln!(out, "\nSubtotal: {}", self.subtotal)?;
        writeln!(out, "Tax (18%): {}", self.tax)?;
        writeln!(out, "Total to Pay: {}", self.total)?;

        Ok(())
    }
}

/// Confirm payment for an invoiced cart, clearing it unconditionally.
///
/// This is the only state-mutating step of checkout.
pub fn confirm(cart: &mut Cart) {
    cart.clear();

    info!("payment confirmed");
}
