/// Database configuration and connection management
pub mod database;

/// Employee roster loading from config.toml
pub mod employees;
