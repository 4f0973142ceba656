//! Business logic and trait definitions for Charla.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (`KvStore`, `ChatTransport`, `ServiceProbe`) and the collaborator
//! boundary for terminal rendering (`RenderPipeline`). It depends only on
//! `charla-types` -- never on `charla-infra` or any HTTP/database crate.

pub mod attachment;
pub mod chat;
pub mod consent;
pub mod monitor;
pub mod probe;
pub mod render;
pub mod session;
pub mod storage;
