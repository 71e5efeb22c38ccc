pub mod configuration;
pub mod connection;
pub mod protocols;
pub mod telemetry;

pub use connection::{
    broker_environment, resolve, resolve_from_process_env, resolve_with_policy,
    ConfigurationError, ConnectionConfig, PortPolicy,
};
