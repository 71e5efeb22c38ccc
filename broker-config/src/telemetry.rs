use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

use crate::configuration::LogLevel;

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Compose multiple layers into a `tracing`'s subscriber.
///
/// This one uses a "pretty" format which is easier for developers to directly read in a terminal.
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn get_pretty_subscriber(level: LogLevel) -> impl Subscriber + Send + Sync {
    Registry::default()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().pretty())
}

/// Compose multiple layers into a `tracing`'s subscriber.
///
/// This one will log everything in a JSON format, good for production systems (i.e. Elasticsearch)
/// but is kind of unreadable for developers
pub fn get_json_subscriber<Sink>(
    name: String,
    level: LogLevel,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Registry::default()
        .with(env_filter(level))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once! A second call returns an error.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
