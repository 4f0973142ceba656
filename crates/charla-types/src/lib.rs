//! Shared domain types for Charla.
//!
//! This crate contains the types exchanged between the core logic, the
//! infrastructure layer, and the CLI: chat requests and stream events,
//! conversation identity, attachments, catalog/health reports, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod attachment;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod session;
