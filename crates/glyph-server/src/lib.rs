//! # Glyph Server
//!
//! Transport front end for the bridge: a newline-delimited JSON listener
//! (TCP or stdio), the host document loop, and an optional HTTP relay
//! for operations the local registry does not serve.

pub mod host_loop;
pub mod listener;
pub mod relay;

pub use host_loop::HostLoop;
pub use listener::{serve_stdio, serve_tcp};
pub use relay::RelayClient;
