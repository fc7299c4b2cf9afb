//! Cart store
//!
//! Wraps [`Cart`] behind a lock and mirrors every mutation to [`CART_KEY`].

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use fitness_types::{Cart, CartItem, ProductId};

use crate::models::{PurchaseRequest, PurchaseResponse};
use crate::storage::{LocalStore, CART_KEY};
use crate::{ClientError, FitnessClient, Result};

/// Persistent shopping cart
pub struct CartStore {
    store: Arc<dyn LocalStore>,
    cart: RwLock<Cart>,
}

impl CartStore {
    /// Create the store, rehydrating from local storage
    ///
    /// A missing value gives an empty cart. An unreadable or non-array value is
    /// logged and replaced by an empty cart.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        let cart = match store.get(CART_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Cart>(&json).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupted cart: {}", e);
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Failed to read stored cart: {}", e);
                Cart::new()
            }
        };

        Self {
            store,
            cart: RwLock::new(cart),
        }
    }

    /// Snapshot of the lines
    pub fn items(&self) -> Vec<CartItem> {
        self.cart.read().items().to_vec()
    }

    /// Snapshot of the whole cart
    pub fn snapshot(&self) -> Cart {
        self.cart.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.read().is_empty()
    }

    /// Sum of price × quantity
    pub fn total(&self) -> Decimal {
        self.cart.read().total()
    }

    /// Number of units, for the cart badge
    pub fn unit_count(&self) -> u32 {
        self.cart.read().unit_count()
    }

    /// Replace every line
    pub fn replace_cart(&self, items: Vec<CartItem>) -> Result<()> {
        self.mutate(|cart| cart.replace(items))
    }

    /// Add a line, summing quantities when the product is already present
    pub fn upsert_item(&self, item: CartItem) -> Result<()> {
        self.mutate(|cart| cart.upsert(item))
    }

    /// Overwrite a quantity; below 1 removes the line. Returns false if absent
    pub fn set_quantity(&self, id: ProductId, quantity: u32) -> Result<bool> {
        self.mutate(|cart| cart.set_quantity(id, quantity))
    }

    /// Remove a line; returns false if absent
    pub fn remove_item(&self, id: ProductId) -> Result<bool> {
        self.mutate(|cart| cart.remove(id))
    }

    pub fn clear(&self) -> Result<()> {
        self.mutate(Cart::clear)
    }

    /// Submit the cart as a purchase
    ///
    /// On success the bought quantities are taken out of the cart; lines added
    /// while the request was in flight stay. On failure the cart is untouched.
    pub async fn checkout(
        &self,
        client: &FitnessClient,
        token: &str,
        payment_type: &str,
    ) -> Result<PurchaseResponse> {
        let lines = self.cart.read().purchase_lines();
        if lines.is_empty() {
            return Err(ClientError::InvalidInput("Le panier est vide".to_string()));
        }

        let response = client
            .purchase(
                token,
                &PurchaseRequest {
                    type_paiement: payment_type.to_string(),
                    produits: lines.clone(),
                },
            )
            .await?;

        tracing::info!(purchase_id = response.id_achat, "Checkout complete");
        self.mutate(|cart| cart.remove_purchased(&lines))?;
        Ok(response)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Cart) -> T) -> Result<T> {
        let (out, json) = {
            let mut cart = self.cart.write();
            let out = f(&mut cart);
            (out, serde_json::to_string(&*cart)?)
        };
        self.store.set(CART_KEY, &json)?;
        Ok(out)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.cart.read().len())
            .finish_non_exhaustive()
    }
}
