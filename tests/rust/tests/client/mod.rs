//! HTTP-facing tests against a wiremock server
//!
//! Endpoint checker probing, the provider-side registration client, and the
//! auto-registrar loop.

mod auto_registrar;
mod endpoint_checker;
