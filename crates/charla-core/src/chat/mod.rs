//! Streaming chat: transport seam, sentinel scanner, protocol consumer.

pub mod client;
pub mod scanner;
pub mod transport;
