//! Domain services backed by external systems

mod endpoint_checker;

pub use endpoint_checker::*;
