//! Persistent settings and the config file they live in.

pub mod config;
pub mod settings;

pub use config::ConfigManager;
pub use settings::{AppSettings, ConnectionSettings, ReportSettings};
