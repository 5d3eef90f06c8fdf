pub mod config;
pub mod guard;
pub mod proto;
pub mod robots;
pub mod router;
pub mod services;
pub mod sitemap;
