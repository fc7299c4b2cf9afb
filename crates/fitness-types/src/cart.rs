//! Cart types
//!
//! The cart only exists on the client. It is a flat list of lines keyed by
//! product id; the server never sees it until checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{order_total, ProductId, PurchaseLine};

/// One cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Create a line with the given quantity
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
            quantity,
        }
    }

    /// Attach an image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Ordered list of cart lines, at most one per product id
///
/// Serialized as a plain array. Lines sharing an id, whether from
/// [`Cart::replace`] or a stored array, are merged into the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Replace every line, merging duplicate ids
    pub fn replace(&mut self, items: Vec<CartItem>) {
        self.items.clear();
        for item in items {
            self.upsert(item);
        }
    }

    /// Merge a line by product id: quantities add up on match, else append
    ///
    /// Quantities saturate at `u32::MAX`.
    pub fn upsert(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Overwrite a line's quantity; anything below 1 removes the line
    ///
    /// Returns false when the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        if !self.contains(id) {
            return false;
        }
        let items = if quantity < 1 {
            self.items.iter().filter(|l| l.id != id).cloned().collect()
        } else {
            self.items
                .iter()
                .map(|l| {
                    if l.id == id {
                        CartItem {
                            quantity,
                            ..l.clone()
                        }
                    } else {
                        l.clone()
                    }
                })
                .collect()
        };
        self.replace(items);
        true
    }

    /// Drop a line; returns false when it was not present
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take bought quantities out of the cart, dropping emptied lines
    ///
    /// Lines added after `lines` was taken are left alone.
    pub fn remove_purchased(&mut self, lines: &[PurchaseLine]) {
        for bought in lines {
            let quantity = u32::try_from(bought.quantity).unwrap_or(0);
            if let Some(line) = self.items.iter_mut().find(|l| l.id == bought.product_id) {
                line.quantity = line.quantity.saturating_sub(quantity);
            }
        }
        self.items.retain(|line| line.quantity > 0);
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|line| line.id == id)
    }

    /// Sum of line totals
    pub fn total(&self) -> Decimal {
        order_total(
            self.items
                .iter()
                .map(|l| (l.price, i32::try_from(l.quantity).unwrap_or(i32::MAX))),
        )
    }

    /// Total number of units across lines
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, l| count.saturating_add(l.quantity))
    }

    /// Lines as sent to the purchase endpoint
    pub fn purchase_lines(&self) -> Vec<PurchaseLine> {
        self.items
            .iter()
            .map(|l| PurchaseLine {
                product_id: l.id,
                quantity: i32::try_from(l.quantity).unwrap_or(i32::MAX),
            })
            .collect()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        cart.replace(items);
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
