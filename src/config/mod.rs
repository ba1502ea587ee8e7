//! Process configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthSettings, DeploymentEnvironment, LogFormat, LoggingConfig, ServerConfig,
    StorageBackend, StorageConfig,
};
