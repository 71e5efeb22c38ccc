/// FOR DEVOPS USERS:
/// This file represents common configuration structures for applications built on this crate.
/// Implementation details are in the "get_configuration" function.
/// The broker connection itself is NOT configured here, see connection.rs.
use std::{fmt::Display, str::FromStr};

pub const CONFIG_FILE_VARIABLE: &str = "APP_CONFIG_FILE";
pub const ENVIRONMENT_PREFIX: &str = "BOOKING";

/// Accepts any casing, and "warn" for `Warning`.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "unknown log level {s:?}, expected one of trace, debug, info, warn, error"
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, <LogLevel as TryFrom<String>>::Error> {
        value.parse()
    }
}

/// Renders the level as a `tracing` filter directive.
impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => f.write_str("debug"),
            LogLevel::Error => f.write_str("error"),
            LogLevel::Warning => f.write_str("warn"),
            LogLevel::Info => f.write_str("info"),
            LogLevel::Trace => f.write_str("trace"),
        }
    }
}

/// Common logic for obtaining a configuration of type T
///
/// Rules:
/// - highest priority comes from environment variables
/// - lowest priority comes from values in the YAML config file (path determined in APP_CONFIG_FILE environment variable)
/// - environment variables can be set for nested structs, i.e. 'Settings.logging.level' is set by 'BOOKING_LOGGING__LEVEL=debug' . Two underscores separate struct values.
/// - 'log_level' defaults to "info" and 'production' defaults to false, anything else without a default must be provided
/// - variables which are not valid UTF-8 are skipped
pub fn get_configuration<'de, T: serde::Deserialize<'de>>() -> Result<T, config::ConfigError> {
    let config_file = std::env::var(CONFIG_FILE_VARIABLE).ok();
    build_configuration(config_file.as_deref(), Some(process_environment()))
}

fn process_environment() -> config::Map<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Same as `get_configuration`, but the file path and the environment are passed in.
///
/// `environment` of `None` reads the process environment through the config crate,
/// which panics on variables that are not valid UTF-8.
pub fn build_configuration<'de, T: serde::Deserialize<'de>>(
    config_file: Option<&str>,
    environment: Option<config::Map<String, String>>,
) -> Result<T, config::ConfigError> {
    let file_config = match config_file {
        Some(config_file_path) => config::Config::builder()
            .add_source(config::File::new(
                config_file_path,
                config::FileFormat::Yaml,
            ))
            .build()?,
        None => config::Config::builder().build()?,
    };

    let settings = config::Config::builder()
        .set_default("production", false)?
        .set_default("log_level", "info")?
        .add_source(file_config)
        // E.g. `BOOKING_LOG_LEVEL=debug` would set `Settings.log_level`
        .add_source(
            config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(environment),
        )
        .build()?;

    settings.try_deserialize::<T>()
}
