use async_trait::async_trait;
use emporium_shared::CartItem;

use crate::CoreResult;

/// Per-user shopping cart storage.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Add `quantity` of a product, merging with any existing line.
    async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> CoreResult<()>;

    /// Current lines of the user's cart. Unknown users have an empty cart.
    async fn get_cart(&self, user_id: &str) -> CoreResult<Vec<CartItem>>;

    /// Remove every line from the user's cart.
    async fn empty_cart(&self, user_id: &str) -> CoreResult<()>;
}
