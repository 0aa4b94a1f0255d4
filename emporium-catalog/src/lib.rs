pub mod ads;
pub mod currency;
pub mod product;

pub use ads::AdTable;
pub use currency::{CurrencyTable, Rate};
pub use product::FileCatalog;

use std::path::PathBuf;

/// Failures while loading catalog or rate data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid rate for {code}: {reason}")]
    InvalidRate { code: String, reason: String },

    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    #[error("Invalid ad in {category}: {reason}")]
    InvalidAd { category: String, reason: String },
}
