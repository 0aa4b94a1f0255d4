use async_trait::async_trait;
use emporium_shared::Ad;

use crate::CoreResult;

/// How many ads are served when no category matches.
pub const MAX_ADS_TO_SERVE: usize = 2;

/// Read-only ad lookup keyed by product category.
#[async_trait]
pub trait AdProvider: Send + Sync {
    /// Ads for every key in `context_keys`, in key order. With no keys, or no
    /// match for any of them, up to `MAX_ADS_TO_SERVE` random ads.
    async fn get_ads(&self, context_keys: &[String]) -> CoreResult<Vec<Ad>>;
}
