/// FOR DEVOPS USERS:
/// The broker connection is configured from these environment variables, every one of them optional:
///
/// | variable            | default            |
/// |---------------------|--------------------|
/// | `RABBITMQ_HOST`     | `booking-rabbitmq` |
/// | `RABBITMQ_PORT`     | `5672`             |
/// | `RABBITMQ_USER`     | `booking_user`     |
/// | `RABBITMQ_PASSWORD` | `booking_password` |
///
/// A variable that is set is used as-is, even when it is empty. `RABBITMQ_PORT` must be a number
/// between 1 and 65535, otherwise resolution fails (see `PortPolicy` to fall back to the default instead).
use std::{collections::HashMap, env::VarError};

use secrecy::{ExposeSecret, Secret};

pub const HOST_VARIABLE: &str = "RABBITMQ_HOST";
pub const PORT_VARIABLE: &str = "RABBITMQ_PORT";
pub const USER_VARIABLE: &str = "RABBITMQ_USER";
pub const PASSWORD_VARIABLE: &str = "RABBITMQ_PASSWORD";

pub const DEFAULT_HOST: &str = "booking-rabbitmq";
pub const DEFAULT_PORT: u16 = 5672;
pub const DEFAULT_USER: &str = "booking_user";
pub const DEFAULT_PASSWORD: &str = "booking_password";

const VARIABLE_PREFIX: &str = "RABBITMQ";
const VARIABLES: [&str; 4] = [
    HOST_VARIABLE,
    PORT_VARIABLE,
    USER_VARIABLE,
    PASSWORD_VARIABLE,
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{variable} must be a port number between 1 and 65535, got {value:?}")]
    InvalidPort { variable: &'static str, value: String },
    #[error("{variable} is set but is not valid UTF-8")]
    NotUnicode { variable: &'static str },
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// How to treat a `RABBITMQ_PORT` value which is not a valid port number.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortPolicy {
    /// fail resolution with `ConfigurationError::InvalidPort`
    #[default]
    Strict,
    /// silently use `DEFAULT_PORT`
    Permissive,
}

/// Connection parameters for the message broker.
///
/// Built once at startup and handed out by reference; there are no setters.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    user: String,
    password: Secret<String>,
}

impl ConnectionConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: Secret::new(DEFAULT_PASSWORD.to_owned()),
        }
    }
}

impl PartialEq for ConnectionConfig {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host
            && self.port == other.port
            && self.user == other.user
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for ConnectionConfig {}

/// Resolve the broker connection from an environment mapping, rejecting malformed ports.
pub fn resolve(
    environment: &HashMap<String, String>,
) -> Result<ConnectionConfig, ConfigurationError> {
    resolve_with_policy(environment, PortPolicy::Strict)
}

/// Resolve the broker connection from a snapshot of this process's environment.
pub fn resolve_from_process_env() -> Result<ConnectionConfig, ConfigurationError> {
    resolve(&broker_environment()?)
}

/// Snapshot the `RABBITMQ_*` variables of this process.
///
/// Only those four variables are read, the rest of the environment may hold anything.
pub fn broker_environment() -> Result<HashMap<String, String>, ConfigurationError> {
    read_broker_environment(|variable| std::env::var(variable))
}

fn read_broker_environment<F>(lookup: F) -> Result<HashMap<String, String>, ConfigurationError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut environment = HashMap::new();
    for variable in VARIABLES {
        match lookup(variable) {
            Ok(value) => {
                environment.insert(variable.to_owned(), value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::NotUnicode { variable });
            }
        }
    }
    Ok(environment)
}

/// Resolve the broker connection from an environment mapping.
///
/// Rules:
/// - only the four `RABBITMQ_*` keys are consulted, and they are matched case-sensitively
/// - a present key always wins over its default
/// - `policy` decides what happens when `RABBITMQ_PORT` does not hold a valid port
pub fn resolve_with_policy(
    environment: &HashMap<String, String>,
    policy: PortPolicy,
) -> Result<ConnectionConfig, ConfigurationError> {
    // the config crate lowercases keys, so filter on the exact names before handing them over
    let source: config::Map<String, String> = environment
        .iter()
        .filter(|(key, _)| VARIABLES.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let settings = config::Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("user", DEFAULT_USER)?
        .set_default("password", DEFAULT_PASSWORD)?
        // E.g. `RABBITMQ_PORT=15672` sets `port`
        .add_source(
            config::Environment::with_prefix(VARIABLE_PREFIX)
                .prefix_separator("_")
                .source(Some(source)),
        )
        .build()?;

    let port = match (parse_port(&settings.get_string("port")?), policy) {
        (Ok(port), _) => port,
        (Err(_), PortPolicy::Permissive) => DEFAULT_PORT,
        (Err(e), PortPolicy::Strict) => return Err(e),
    };

    Ok(ConnectionConfig {
        host: settings.get_string("host")?,
        port,
        user: settings.get_string("user")?,
        password: Secret::new(settings.get_string("password")?),
    })
}

fn parse_port(raw: &str) -> Result<u16, ConfigurationError> {
    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigurationError::InvalidPort {
            variable: PORT_VARIABLE,
            value: raw.to_owned(),
        }),
    }
}
