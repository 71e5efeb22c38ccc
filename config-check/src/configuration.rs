/// FOR DEVOPS USERS:
/// 1) The root struct is "Settings", follow logic from there
/// 2) if using environment variables, prefix them with BOOKING_ (i.e. BOOKING_LOG_LEVEL=debug)
/// 3) if using a file, its path is read from the APP_CONFIG_FILE environment variable (environment variables have higher precedence)
/// 4) the broker connection is NOT part of these settings, it is always read from the RABBITMQ_* variables
/// 5) Additional logic can be found in broker-config/src/configuration.rs
use booking_broker_config::{configuration::LogLevel, PortPolicy};
pub use booking_broker_config::configuration::{build_configuration, get_configuration};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    /// log level of the entire application
    pub log_level: LogLevel,
    /// set to true for developer-unfriendly settings (currently just log formats)
    pub production: bool,
    /// "strict" (default) fails on a malformed RABBITMQ_PORT, "permissive" falls back to 5672
    #[serde(default)]
    pub port_policy: PortPolicy,
}
