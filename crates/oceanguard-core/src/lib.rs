//! Shared configuration and data contracts for the oceanguard workspace.

mod app_config;
mod config;
mod error;
pub mod reports;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ReportStoreError};
pub use reports::{LocalReport, ReportStore};
