//! HTTP implementations of the core transport and probe traits.

pub mod probe;
pub mod transport;

pub use probe::HttpServiceProbe;
pub use transport::HttpChatTransport;
