//! Kiosk
//!
//! Kiosk is a single-process shop core: a fixed product catalog, a
//! quantity-merging cart, a plaintext user directory with session gating, and
//! a checkout that computes an 18% tax invoice. Presentation is someone
//! else's job; front ends drive the [`shop::Shop`] facade.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod products;
pub mod shop;
pub mod utils;
