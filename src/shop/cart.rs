//! Client-side shopping cart

use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// A product line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Cart contents in the order products were first added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.find_mut(product.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
        });
    }

    /// One more unit of a product already in the cart
    pub fn increase(&mut self, id: u64) {
        if let Some(item) = self.find_mut(id) {
            item.quantity += 1;
        }
    }

    /// One less unit; the line disappears at zero
    pub fn decrease(&mut self, id: u64) {
        if let Some(item) = self.find_mut(id) {
            item.quantity = item.quantity.saturating_sub(1);
        }
        self.items.retain(|item| item.quantity > 0);
    }

    pub fn remove(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Units of a product in the cart (0 if absent)
    pub fn quantity_of(&self, id: u64) -> u32 {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total formatted to cents, as shown at checkout
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total_price())
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}
