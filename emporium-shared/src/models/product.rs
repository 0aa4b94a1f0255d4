use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Catalog record. `price` is denominated in the catalog's base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    pub price: Money,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// Case-insensitive substring match over name and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
