/// Database connection and schema creation
pub mod database;

/// Settings file and environment handling
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};
