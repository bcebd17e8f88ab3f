//! KMIP peers running in the test process.
//!
//! - [`start_echo_server`] returns every framed message verbatim,
//! - [`start_silent_server`] reads requests and never answers,
//! - [`start_kmip_server`] simulates a KMIP 1.4 key manager, with fault
//!   injection through [`ServerOptions`].

pub use echo_server::{SilentServer, start_echo_server, start_silent_server};
pub use kmip_server::{KeySnapshot, KmipServerHandle, ServerOptions, start_kmip_server};

mod echo_server;
mod framing;
mod kmip_server;
mod operations;

/// A local address nothing listens on
pub fn refused_address() -> std::io::Result<std::net::SocketAddr> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    listener.local_addr()
}
