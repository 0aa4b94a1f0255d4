//! Scripted collaborators that record every call into a shared log.

use crate::models::PlaceOrderRequest;
use crate::orchestrator::CheckoutServices;
use async_trait::async_trait;
use emporium_core::{
    CartStore, CoreError, CoreResult, CurrencyConverter, Notifier, PaymentProcessor,
    ProductCatalog, ShippingService,
};
use emporium_shared::{
    Address, CartItem, CreditCardInfo, Masked, Money, OrderResult, Product,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, call: impl Into<String>) {
    log.lock().unwrap().push(call.into());
}

pub struct FakeCart {
    pub items: Vec<CartItem>,
    pub fail_get: bool,
    pub fail_empty: bool,
    pub log: CallLog,
}

#[async_trait]
impl CartStore for FakeCart {
    async fn add_item(&self, _user_id: &str, _product_id: &str, _quantity: i32) -> CoreResult<()> {
        record(&self.log, "cart.add");
        Ok(())
    }

    async fn get_cart(&self, user_id: &str) -> CoreResult<Vec<CartItem>> {
        record(&self.log, format!("cart.get:{}", user_id));
        if self.fail_get {
            return Err(CoreError::unavailable("cart", "connection refused"));
        }
        Ok(self.items.clone())
    }

    async fn empty_cart(&self, user_id: &str) -> CoreResult<()> {
        record(&self.log, format!("cart.empty:{}", user_id));
        if self.fail_empty {
            return Err(CoreError::unavailable("cart", "connection reset"));
        }
        Ok(())
    }
}

pub struct FakeCatalog {
    pub prices: HashMap<String, Money>,
    pub log: CallLog,
}

#[async_trait]
impl ProductCatalog for FakeCatalog {
    async fn get_product(&self, id: &str) -> CoreResult<Product> {
        record(&self.log, format!("catalog.get:{}", id));
        let price = self
            .prices
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(Product {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            picture: String::new(),
            price,
            categories: Vec::new(),
        })
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn search_products(&self, _query: &str) -> CoreResult<Vec<Product>> {
        Ok(Vec::new())
    }
}

/// Converts between supported codes at a 1:1 rate.
pub struct FakeCurrency {
    pub supported: Vec<String>,
    pub log: CallLog,
}

#[async_trait]
impl CurrencyConverter for FakeCurrency {
    async fn convert(&self, from: &Money, to_code: &str) -> CoreResult<Money> {
        record(&self.log, format!("currency.convert:{}", to_code));
        for code in [from.currency_code.as_str(), to_code] {
            if !self.supported.iter().any(|s| s == code) {
                return Err(CoreError::UnsupportedCurrency(code.to_string()));
            }
        }
        Ok(Money::new(to_code, from.units, from.nanos))
    }

    async fn supported_currencies(&self) -> CoreResult<Vec<String>> {
        Ok(self.supported.clone())
    }
}

pub struct FakeShipping {
    pub quote: Money,
    pub fail_quote: bool,
    pub fail_ship: bool,
    pub log: CallLog,
}

#[async_trait]
impl ShippingService for FakeShipping {
    async fn get_quote(&self, _address: &Address, _items: &[CartItem]) -> CoreResult<Money> {
        record(&self.log, "shipping.quote");
        if self.fail_quote {
            return Err(CoreError::unavailable("shipping", "timeout"));
        }
        Ok(self.quote.clone())
    }

    async fn ship_order(&self, _address: &Address, _items: &[CartItem]) -> CoreResult<String> {
        record(&self.log, "shipping.ship");
        if self.fail_ship {
            return Err(CoreError::unavailable("shipping", "timeout"));
        }
        Ok("AB-1234-5678901".to_string())
    }
}

pub struct FakePayment {
    pub decline: bool,
    pub charged: Arc<Mutex<Vec<Money>>>,
    pub log: CallLog,
}

#[async_trait]
impl PaymentProcessor for FakePayment {
    async fn charge(&self, amount: &Money, _card: &CreditCardInfo) -> CoreResult<String> {
        record(&self.log, "payment.charge");
        if self.decline {
            return Err(CoreError::PaymentDeclined("card expired".to_string()));
        }
        self.charged.lock().unwrap().push(amount.clone());
        Ok("txn-1".to_string())
    }
}

pub struct FakeNotifier {
    pub fail: bool,
    pub log: CallLog,
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_order_confirmation(&self, email: &str, _order: &OrderResult) -> CoreResult<()> {
        record(&self.log, format!("notify:{}", email));
        if self.fail {
            return Err(CoreError::unavailable("notification", "smtp down"));
        }
        Ok(())
    }
}

/// Knobs for one scripted checkout. Defaults describe the happy path:
/// 2 x 10.50 USD plus 1 x 4.00 USD with 8.99 USD shipping.
pub struct Script {
    pub items: Vec<CartItem>,
    pub prices: HashMap<String, Money>,
    pub supported: Vec<String>,
    pub shipping_quote: Money,
    pub fail_cart_get: bool,
    pub fail_cart_empty: bool,
    pub fail_quote: bool,
    pub fail_ship: bool,
    pub decline: bool,
    pub fail_notify: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            items: vec![CartItem::new("A", 2), CartItem::new("B", 1)],
            prices: HashMap::from([
                ("A".to_string(), Money::new("USD", 10, 500_000_000)),
                ("B".to_string(), Money::new("USD", 4, 0)),
            ]),
            supported: vec!["USD".to_string(), "EUR".to_string()],
            shipping_quote: Money::new("USD", 8, 990_000_000),
            fail_cart_get: false,
            fail_cart_empty: false,
            fail_quote: false,
            fail_ship: false,
            decline: false,
            fail_notify: false,
        }
    }
}

pub struct Harness {
    pub services: CheckoutServices,
    pub log: CallLog,
    pub charged: Arc<Mutex<Vec<Money>>>,
}

impl Harness {
    pub fn new(script: Script) -> Self {
        let log: CallLog = Arc::default();
        let charged: Arc<Mutex<Vec<Money>>> = Arc::default();
        let services = CheckoutServices {
            cart: Arc::new(FakeCart {
                items: script.items,
                fail_get: script.fail_cart_get,
                fail_empty: script.fail_cart_empty,
                log: log.clone(),
            }),
            catalog: Arc::new(FakeCatalog {
                prices: script.prices,
                log: log.clone(),
            }),
            currency: Arc::new(FakeCurrency {
                supported: script.supported,
                log: log.clone(),
            }),
            shipping: Arc::new(FakeShipping {
                quote: script.shipping_quote,
                fail_quote: script.fail_quote,
                fail_ship: script.fail_ship,
                log: log.clone(),
            }),
            payment: Arc::new(FakePayment {
                decline: script.decline,
                charged: Arc::clone(&charged),
                log: log.clone(),
            }),
            notifier: Arc::new(FakeNotifier {
                fail: script.fail_notify,
                log: log.clone(),
            }),
        };
        Self {
            services,
            log,
            charged,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    pub fn charges(&self) -> Vec<Money> {
        self.charged.lock().unwrap().clone()
    }
}

pub fn address() -> Address {
    Address {
        street_address: "1600 Amphitheatre Parkway".to_string(),
        city: "Mountain View".to_string(),
        state: "CA".to_string(),
        country: "United States".to_string(),
        zip_code: 94043,
    }
}

pub fn request(user_id: &str, currency: &str) -> PlaceOrderRequest {
    PlaceOrderRequest {
        user_id: user_id.to_string(),
        user_currency: currency.to_string(),
        address: address(),
        email: Masked::new("someone@example.com".to_string()),
        credit_card: CreditCardInfo {
            credit_card_number: Masked::new("4432801561520454".to_string()),
            credit_card_cvv: Masked::new(672),
            credit_card_expiration_year: 2039,
            credit_card_expiration_month: 1,
        },
    }
}
