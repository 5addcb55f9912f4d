// src/core/mod.rs
//! Configuration and the backend client

pub mod config_manager;
pub mod service_client;

pub use config_manager::{ConfigManager, Overrides};
pub use service_client::{AnalysisBackend, ServiceClient};
