//! Product catalog
//!
//! Products use the dummyjson.com shape: a listing is
//! `{"products": [...], "total": n, "skip": n, "limit": n}` and a detail
//! response is a bare product object.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Products shown on the home screen
pub const FEATURED_PRODUCT_LIMIT: usize = 20;

/// Catalog failures
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid product id: {0:?}")]
    InvalidId(String),

    #[error("product {id} not found")]
    NotFound { id: u64 },
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
}

/// A page of products as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Parse a product id as it arrives from a route parameter
pub fn parse_product_id(raw: &str) -> Result<u64, CatalogError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CatalogError::InvalidId(raw.to_string()))
}

/// Anything that can list products and look one up by id
pub trait CatalogSource {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
    fn product(&self, id: u64) -> Result<Product, CatalogError>;

    /// The first [`FEATURED_PRODUCT_LIMIT`] products
    fn featured(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.list_products()?;
        products.truncate(FEATURED_PRODUCT_LIMIT);
        Ok(products)
    }
}

/// Catalog backed by an already-fetched listing document
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    page: Option<ProductPage>,
}

impl JsonCatalog {
    /// Parse a listing document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let page: ProductPage = serde_json::from_str(json)?;
        log::info!(
            "Catalog loaded: {} products ({} total upstream)",
            page.products.len(),
            page.total
        );
        Ok(Self { page: Some(page) })
    }

    /// Read and parse a listing document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// An empty catalog; the storefront shows it as still loading
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.page.is_some()
    }
}

impl CatalogSource for JsonCatalog {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .page
            .as_ref()
            .map(|p| p.products.clone())
            .unwrap_or_default())
    }

    fn product(&self, id: u64) -> Result<Product, CatalogError> {
        self.page
            .as_ref()
            .and_then(|p| p.products.iter().find(|product| product.id == id))
            .cloned()
            .ok_or(CatalogError::NotFound { id })
    }
}

/// Parse a single-product detail document
pub fn parse_product(json: &str) -> Result<Product, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(n: u64) -> String {
        let products: Vec<String> = (1..=n)
            .map(|id| {
                format!(
                    r#"{{"id":{id},"title":"Item {id}","description":"d","price":{id}.5,"thumbnail":"t{id}.png","images":["a.png"],"brand":"ignored"}}"#
                )
            })
            .collect();
        format!(
            r#"{{"products":[{}],"total":194,"skip":0,"limit":30}}"#,
            products.join(",")
        )
    }

    #[test]
    fn test_parse_listing() {
        let catalog = JsonCatalog::from_json(&listing(3)).unwrap();
        let products = catalog.list_products().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].title, "Item 2");
        assert_eq!(products[1].price, 2.5);
        assert_eq!(products[1].images, vec!["a.png".to_string()]);
    }

    #[test]
    fn test_featured_is_capped() {
        let catalog = JsonCatalog::from_json(&listing(30)).unwrap();
        let featured = catalog.featured().unwrap();
        assert_eq!(featured.len(), FEATURED_PRODUCT_LIMIT);
        assert_eq!(featured[0].id, 1);
    }

    #[test]
    fn test_product_lookup() {
        let catalog = JsonCatalog::from_json(&listing(5)).unwrap();
        assert_eq!(catalog.product(4).unwrap().title, "Item 4");
        assert!(matches!(
            catalog.product(99),
            Err(CatalogError::NotFound { id: 99 })
        ));
    }

    #[test]
    fn test_loading_catalog_is_empty() {
        let catalog = JsonCatalog::loading();
        assert!(!catalog.is_loaded());
        assert!(catalog.list_products().unwrap().is_empty());
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(
            JsonCatalog::from_json("{\"items\":[]}"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            JsonCatalog::from_path("/definitely/not/here.json"),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_product_id("abc"),
            Err(CatalogError::InvalidId(_))
        ));
        assert!(parse_product_id("").is_err());
    }

    #[test]
    fn test_parse_single_product() {
        let product =
            parse_product(r#"{"id":1,"title":"Mascara","price":9.99,"stock":5}"#).unwrap();
        assert_eq!(product.stock, Some(5));
        assert!(product.images.is_empty());
    }
}
