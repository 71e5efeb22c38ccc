use std::collections::HashMap;

use booking_broker_config::{resolve_with_policy, ConfigurationError, ConnectionConfig};

use crate::configuration::Settings;

pub mod configuration;

/// Resolve the broker connection from `environment` with the policy from `settings`, and report it.
pub fn run(
    settings: &Settings,
    environment: &HashMap<String, String>,
) -> Result<ConnectionConfig, ConfigurationError> {
    check(resolve_with_policy(environment, settings.port_policy))
}

/// Report the outcome of resolving the broker connection.
///
/// The password is never logged.
pub fn check(
    resolved: Result<ConnectionConfig, ConfigurationError>,
) -> Result<ConnectionConfig, ConfigurationError> {
    match resolved {
        Ok(connection) => {
            tracing::info!(
                host = connection.host(),
                port = connection.port(),
                user = connection.user(),
                "broker configuration resolved"
            );
            Ok(connection)
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid broker configuration");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use booking_broker_config::{configuration::LogLevel, PortPolicy};

    use super::*;

    fn settings(port_policy: PortPolicy) -> Settings {
        Settings {
            log_level: LogLevel::Info,
            production: false,
            port_policy,
        }
    }

    #[test]
    fn run_returns_resolved_connection() {
        let environment = HashMap::from([("RABBITMQ_HOST".to_string(), "mq".to_string())]);
        let connection = run(&settings(PortPolicy::Strict), &environment).unwrap();
        assert_eq!(connection.host(), "mq");
        assert_eq!(connection.port(), 5672);
    }

    #[test]
    fn run_fails_on_invalid_port_when_strict() {
        let environment = HashMap::from([("RABBITMQ_PORT".to_string(), "70000".to_string())]);
        let err = run(&settings(PortPolicy::Strict), &environment).unwrap_err();
        assert!(err.to_string().contains("RABBITMQ_PORT"));
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn run_falls_back_on_invalid_port_when_permissive() {
        let environment = HashMap::from([("RABBITMQ_PORT".to_string(), "70000".to_string())]);
        let connection = run(&settings(PortPolicy::Permissive), &environment).unwrap();
        assert_eq!(connection.port(), 5672);
    }

    #[test]
    fn check_passes_errors_through() {
        let err = check(Err(ConfigurationError::NotUnicode {
            variable: "RABBITMQ_USER",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("RABBITMQ_USER"));
    }
}
