pub mod app_config;
pub mod cart_store;

pub use app_config::Config;
pub use cart_store::MemoryCartStore;
