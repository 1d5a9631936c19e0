//! Provider registration
//!
//! - `validator` - pure input checks
//! - `handler` - Register / Unregister / Get / List orchestration
//! - `error` - error taxonomy surfaced to transport layers
//! - `types` - request and response payloads

mod error;
mod handler;
mod types;
mod validator;

pub use error::*;
pub use handler::{catalog_item_for, RegistrationHandler, RegistrationHandlerBuilder};
pub use types::{RegistrationRequest, RegistrationResult};
pub use validator::Validator;
