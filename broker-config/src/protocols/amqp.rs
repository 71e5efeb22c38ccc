use amqprs::connection::OpenConnectionArguments;
use secrecy::ExposeSecret;

use crate::connection::ConnectionConfig;

/// The virtual host every booking service talks to.
pub const VIRTUAL_HOST: &str = "/";

/// Build the arguments an `amqprs` client needs to open a connection to the broker.
///
/// Nothing is opened here, pass the result to `Connection::open`.
pub fn open_connection_arguments(connection_details: &ConnectionConfig) -> OpenConnectionArguments {
    let mut args = OpenConnectionArguments::new(
        connection_details.host(),
        connection_details.port(),
        connection_details.user(),
        connection_details.password().expose_secret(),
    );
    args.virtual_host(VIRTUAL_HOST);
    args
}

impl From<&ConnectionConfig> for OpenConnectionArguments {
    fn from(connection_details: &ConnectionConfig) -> Self {
        open_connection_arguments(connection_details)
    }
}
