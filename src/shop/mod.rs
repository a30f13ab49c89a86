//! Storefront model
//!
//! The catalog and cart behind the shop screens. Fetching is left to the
//! caller; this module only understands the documents it gets back.

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartItem};
pub use catalog::{
    CatalogError, CatalogSource, FEATURED_PRODUCT_LIMIT, JsonCatalog, Product, ProductPage,
    parse_product, parse_product_id,
};
