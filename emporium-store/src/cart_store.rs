use async_trait::async_trait;
use emporium_core::{CartStore, CoreError, CoreResult};
use emporium_shared::CartItem;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type UserCart = Arc<RwLock<BTreeMap<String, i32>>>;

/// In-memory cart store.
///
/// The outer lock only guards the user index; every user's lines sit behind
/// their own lock, so operations on different users never wait on each other
/// once the user has an entry. Writers hold the index read lock while they
/// touch a cart, so `empty_cart` can drop the entry without losing an add.
#[derive(Default)]
pub struct MemoryCartStore {
    carts: RwLock<HashMap<String, UserCart>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn cart(&self, user_id: &str) -> Option<UserCart> {
        self.carts.read().await.get(user_id).cloned()
    }
}

fn merge(lines: &mut BTreeMap<String, i32>, product_id: &str, quantity: i32) -> CoreResult<i32> {
    let current = lines.get(product_id).copied().unwrap_or(0);
    let updated = current.checked_add(quantity).ok_or_else(|| {
        CoreError::ValidationError(format!("quantity overflow for {}", product_id))
    })?;
    lines.insert(product_id.to_string(), updated);
    Ok(updated)
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> CoreResult<()> {
        if user_id.is_empty() || product_id.is_empty() {
            return Err(CoreError::ValidationError(
                "user_id and product_id are required".to_string(),
            ));
        }
        if quantity <= 0 {
            return Err(CoreError::ValidationError(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }

        let existing = {
            let carts = self.carts.read().await;
            if let Some(cart) = carts.get(user_id) {
                let mut lines = cart.write().await;
                Some(merge(&mut lines, product_id, quantity)?)
            } else {
                None
            }
        };
        let updated = match existing {
            Some(updated) => updated,
            None => {
                let mut carts = self.carts.write().await;
                let cart = carts.entry(user_id.to_string()).or_default().clone();
                let mut lines = cart.write().await;
                merge(&mut lines, product_id, quantity)?
            }
        };

        debug!(user_id, product_id, quantity = updated, "Cart item added");
        Ok(())
    }

    async fn get_cart(&self, user_id: &str) -> CoreResult<Vec<CartItem>> {
        let Some(cart) = self.cart(user_id).await else {
            return Ok(Vec::new());
        };
        let lines = cart.read().await;
        Ok(lines
            .iter()
            .map(|(product_id, quantity)| CartItem::new(product_id.clone(), *quantity))
            .collect())
    }

    async fn empty_cart(&self, user_id: &str) -> CoreResult<()> {
        if self.carts.write().await.remove(user_id).is_some() {
            debug!(user_id, "Cart emptied");
        }
        Ok(())
    }
}
