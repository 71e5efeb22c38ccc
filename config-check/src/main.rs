use booking_broker_config::{
    broker_environment,
    telemetry::{get_json_subscriber, get_pretty_subscriber, init_subscriber},
};
use broker_config_check::{
    check,
    configuration::{get_configuration, Settings},
    run,
};

fn main() -> anyhow::Result<()> {
    let configuration: Settings = get_configuration()?;

    // Start logging
    if configuration.production {
        let subscriber = get_json_subscriber(
            "broker-config-check".into(),
            configuration.log_level,
            std::io::stderr,
        );
        init_subscriber(subscriber)?;
    } else {
        let subscriber = get_pretty_subscriber(configuration.log_level);
        init_subscriber(subscriber)?;
    }

    let resolved = match broker_environment() {
        Ok(environment) => run(&configuration, &environment),
        Err(e) => check(Err(e)),
    };
    if resolved.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
