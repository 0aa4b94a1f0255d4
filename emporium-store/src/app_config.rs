use emporium_core::CardType;
use emporium_shared::Money;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub shipping: ShippingConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub ads: AdsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub products_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    pub rates_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShippingConfig {
    #[serde(default = "default_flat_rate")]
    pub flat_rate: Money,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            flat_rate: default_flat_rate(),
        }
    }
}

fn default_flat_rate() -> Money {
    Money::new("USD", 8, 990_000_000)
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    #[serde(default = "default_accepted_cards")]
    pub accepted_cards: Vec<CardType>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            accepted_cards: default_accepted_cards(),
        }
    }
}

fn default_accepted_cards() -> Vec<CardType> {
    vec![CardType::Visa, CardType::Mastercard]
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdsConfig {
    #[serde(default = "default_ads_path")]
    pub ads_path: String,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            ads_path: default_ads_path(),
        }
    }
}

fn default_ads_path() -> String {
    "data/ads.json".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `EMPORIUM__SERVER__PORT=9000` sets `server.port`
            .add_source(config::Environment::with_prefix("EMPORIUM").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a single TOML document, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
