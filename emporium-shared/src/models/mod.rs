pub mod ad;
pub mod cart;
pub mod order;
pub mod payment;
pub mod product;

pub use ad::Ad;
pub use cart::CartItem;
pub use order::{Address, OrderItem, OrderResult};
pub use payment::CreditCardInfo;
pub use product::Product;
