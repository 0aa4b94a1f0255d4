use async_trait::async_trait;
use emporium_shared::{Address, CartItem, Money};
use rand::Rng;

use crate::{CoreError, CoreResult};

#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Price of shipping `items` to `address`, in the shipper's own currency.
    async fn get_quote(&self, address: &Address, items: &[CartItem]) -> CoreResult<Money>;

    /// Hand the parcel over to the carrier and return its tracking id.
    async fn ship_order(&self, address: &Address, items: &[CartItem]) -> CoreResult<String>;
}

/// Carrier that charges one flat rate per order.
pub struct FlatRateShipping {
    rate: Money,
}

impl FlatRateShipping {
    /// The rate must be strictly positive: an empty cart is charged the
    /// shipping cost alone, and card processors refuse zero amounts.
    pub fn new(rate: Money) -> CoreResult<Self> {
        if !rate.is_valid() || rate.is_negative() || rate.is_zero() {
            return Err(CoreError::ValidationError(format!(
                "invalid flat shipping rate: {}",
                rate
            )));
        }
        Ok(Self { rate })
    }
}

impl Default for FlatRateShipping {
    fn default() -> Self {
        Self {
            rate: Money::new("USD", 8, 990_000_000),
        }
    }
}

#[async_trait]
impl ShippingService for FlatRateShipping {
    async fn get_quote(&self, _address: &Address, items: &[CartItem]) -> CoreResult<Money> {
        tracing::debug!(items = items.len(), quote = %self.rate, "Shipping quote issued");
        Ok(self.rate.clone())
    }

    async fn ship_order(&self, address: &Address, items: &[CartItem]) -> CoreResult<String> {
        let tracking_id = generate_tracking_id(&address.label());
        tracing::info!(%tracking_id, items = items.len(), "Shipment created");
        Ok(tracking_id)
    }
}

/// Format: `{L}{L}-{len}{ddd}-{len/2}{ddddddd}` where `len` is the length of
/// the salt (the address label).
fn generate_tracking_id(salt: &str) -> String {
    let mut rng = rand::thread_rng();
    let first = random_letter(&mut rng);
    let second = random_letter(&mut rng);
    let short = random_digits(&mut rng, 3);
    let long = random_digits(&mut rng, 7);
    format!(
        "{}{}-{}{}-{}{}",
        first,
        second,
        salt.len(),
        short,
        salt.len() / 2,
        long
    )
}

fn random_letter(rng: &mut impl Rng) -> char {
    char::from(rng.gen_range(b'A'..=b'Z'))
}

fn random_digits(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
