//! Application Ports (Driven)
//!
//! Ports define interfaces for the external systems the report depends on.

mod exchange_port;
mod notifier_port;

pub use exchange_port::{AccessToken, ClientCredentials, ExchangeError, ExchangePort};
pub use notifier_port::{NotifierError, NotifierPort};
