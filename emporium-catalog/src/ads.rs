use async_trait::async_trait;
use emporium_core::{AdProvider, CoreResult, MAX_ADS_TO_SERVE};
use emporium_shared::Ad;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::CatalogError;

/// Ads grouped by the product category they advertise into.
#[derive(Default)]
pub struct AdTable {
    by_category: HashMap<String, Vec<Ad>>,
    all: Vec<Ad>,
}

impl AdTable {
    pub fn new(by_category: HashMap<String, Vec<Ad>>) -> Result<Self, CatalogError> {
        for (category, ads) in &by_category {
            if let Some(ad) = ads
                .iter()
                .find(|ad| ad.redirect_url.trim().is_empty() || ad.text.trim().is_empty())
            {
                return Err(CatalogError::InvalidAd {
                    category: category.clone(),
                    reason: format!("empty redirect url or text in {:?}", ad),
                });
            }
        }

        let mut categories: Vec<&String> = by_category.keys().collect();
        categories.sort();
        let all = categories
            .into_iter()
            .flat_map(|c| by_category[c].iter().cloned())
            .collect();

        Ok(Self { by_category, all })
    }

    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let raw = tokio::fs::read(&path).await.map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let table = Self::from_json(&raw, &path)?;
        tracing::info!(path = %path.display(), ads = table.all.len(), "Ad table loaded");
        Ok(table)
    }

    fn from_json(raw: &[u8], path: &Path) -> Result<Self, CatalogError> {
        let by_category: HashMap<String, Vec<Ad>> =
            serde_json::from_slice(raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(by_category)
    }

    fn matching(&self, context_keys: &[String]) -> Vec<Ad> {
        context_keys
            .iter()
            .filter_map(|key| self.by_category.get(key))
            .flatten()
            .cloned()
            .collect()
    }

    /// Picks with replacement, so a one-ad table still fills every slot.
    fn random(&self) -> Vec<Ad> {
        let mut rng = rand::thread_rng();
        (0..MAX_ADS_TO_SERVE)
            .filter_map(|_| self.all.choose(&mut rng).cloned())
            .collect()
    }
}

#[async_trait]
impl AdProvider for AdTable {
    async fn get_ads(&self, context_keys: &[String]) -> CoreResult<Vec<Ad>> {
        let ads = self.matching(context_keys);
        if !ads.is_empty() {
            tracing::debug!(?context_keys, ads = ads.len(), "Contextual ads served");
            return Ok(ads);
        }
        Ok(self.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> AdTable {
        AdTable::new(HashMap::from([
            (
                "kitchen".to_string(),
                vec![
                    Ad::new("/product/9SIQT8TOJO", "Bamboo Glass Jar, 10% off"),
                    Ad::new("/product/6E92ZMYYFZ", "Mug, Buy Two Get One Free"),
                ],
            ),
            (
                "footwear".to_string(),
                vec![Ad::new("/product/L9ECAV7KIM", "Loafers, Buy One Get Two Free")],
            ),
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn test_category_ads_in_key_order() {
        let ads = table().get_ads(&keys(&["footwear", "kitchen"])).await.unwrap();
        let texts: Vec<&str> = ads.iter().map(|ad| ad.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Loafers, Buy One Get Two Free",
                "Bamboo Glass Jar, 10% off",
                "Mug, Buy Two Get One Free"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_keys_fall_back_to_random() {
        let table = table();
        let ads = table.get_ads(&keys(&["garden"])).await.unwrap();
        assert_eq!(ads.len(), MAX_ADS_TO_SERVE);
        assert!(ads.iter().all(|ad| table.all.contains(ad)));

        let ads = table.get_ads(&[]).await.unwrap();
        assert_eq!(ads.len(), MAX_ADS_TO_SERVE);
    }

    #[tokio::test]
    async fn test_single_ad_fills_every_slot() {
        let table = AdTable::new(HashMap::from([(
            "hair".to_string(),
            vec![Ad::new("/product/2ZYFJ3GM2N", "Hair Dryer, 50% off")],
        )]))
        .unwrap();
        let ads = table.get_ads(&[]).await.unwrap();
        assert_eq!(ads.len(), MAX_ADS_TO_SERVE);
        assert!(ads.iter().all(|ad| ad.text == "Hair Dryer, 50% off"));
    }

    #[tokio::test]
    async fn test_empty_table_serves_nothing() {
        let table = AdTable::new(HashMap::new()).unwrap();
        assert!(table.get_ads(&keys(&["kitchen"])).await.unwrap().is_empty());
    }

    #[test]
    fn test_blank_ad_rejected() {
        let result = AdTable::new(HashMap::from([(
            "decor".to_string(),
            vec![Ad::new("", "Candle Holder, 30% off")],
        )]));
        assert!(matches!(result, Err(CatalogError::InvalidAd { category, .. }) if category == "decor"));
    }

    #[tokio::test]
    async fn test_load_bundled_ads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/ads.json");
        let table = AdTable::load(path).await.unwrap();
        let ads = table.get_ads(&keys(&["accessories"])).await.unwrap();
        assert_eq!(ads, vec![Ad::new("/product/1YMWWN1N4O", "Watch, Buy One Get One Free")]);
    }
}
