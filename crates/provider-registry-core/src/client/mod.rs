//! Provider-side registration support
//!
//! - `RegistrationClient` talks to the directory over HTTP
//! - `AutoRegistrar` keeps registrations fresh with periodic re-registration

mod auto_register;
mod registration_client;

pub use auto_register::{AutoRegistrar, Registration, DEFAULT_REREGISTER_INTERVAL};
pub use registration_client::{RegistrationClient, DEFAULT_CLIENT_TIMEOUT};
