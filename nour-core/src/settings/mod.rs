pub mod config;
pub mod manager;


pub use config::{Settings, API_KEY_ENV};
pub use manager::SettingsManager;
