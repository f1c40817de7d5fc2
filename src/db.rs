pub mod aftersales_repo;
pub use aftersales_repo::AftersalesRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod dealer_repo;
pub use dealer_repo::DealerRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
