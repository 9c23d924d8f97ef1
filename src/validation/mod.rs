//! Pure validation over decoded provider configuration.

pub mod infrastructure;
pub mod worker;

pub use infrastructure::{validate_infrastructure_config, validate_infrastructure_config_update};
pub use worker::validate_worker_config;
