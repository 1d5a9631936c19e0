//! Application tests
//!
//! Registration handler orchestration against in-memory stores, including
//! the partial-failure windows between the registry and the catalog.
