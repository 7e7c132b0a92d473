// src/core/mod.rs
//! Configuration and persistence shared by the CLI and the API server

pub mod config_manager;
pub mod database;
pub mod portfolio_store;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use portfolio_store::PortfolioStore;
