//! Storefront
//!
//! Storefront is the catalog, cart and admin core of a phone and accessories shop: filtering and
//! sorting the catalog, pricing a cart with per-product discounts, and validating admin forms.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod discounts;
pub mod filters;
pub mod fixtures;
pub mod listing;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod sorting;
pub mod state;
pub mod text;
