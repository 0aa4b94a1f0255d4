pub mod money;
pub mod models;
pub mod pii;

pub use money::{Money, MoneyError, MoneyResult};
pub use models::{Ad, Address, CartItem, CreditCardInfo, OrderItem, OrderResult, Product};
pub use pii::Masked;
