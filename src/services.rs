pub mod aftersales_service;
pub mod auth;
pub mod catalog_service;
pub mod notification_service;
pub mod order_service;
pub mod pricing_service;
pub mod quote_service;
