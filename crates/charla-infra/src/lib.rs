//! Infrastructure layer for Charla.
//!
//! Contains implementations of the traits defined in `charla-core`:
//! the reqwest HTTP chat transport and service probes, the SQLite
//! key-value store, and the config loader.

pub mod config;
pub mod http;
pub mod sqlite;
