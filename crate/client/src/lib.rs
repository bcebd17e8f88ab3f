//! Pipelined KMIP client.
//!
//! [`Transport`] keeps one connection to the server and pipelines requests
//! on it, [`Driver`] speaks the KMIP request/response protocol and runs the
//! connection handshake, and [`KmipKeyClient`] exposes the bucket key life
//! cycle and data key encryption used for encryption at rest.

pub use config::{
    ClientConfig, DEFAULT_KMIP_PORT, DEFAULT_PIPELINE_DEPTH, KeyManagementConfig, TlsConfig,
    TransportConfig,
};
pub use driver::{Driver, KmipResponse, MAXIMUM_RESPONSE_SIZE, ProtocolVersion, ServerCapabilities};
pub use error::{
    KmipClientError,
    result::{KmipClientResult, KmipClientResultHelper},
};
pub use key_management::{FIXED_IV, HEALTHCHECK_BUCKET_NAME, KmipKeyClient};
pub use transport::{
    ConnectionId, Connector, HandshakeFn, KmipStream, PipelineStats, TcpConnector, TlsConnector,
    Transport, connector_from_config,
};

pub mod reexport {
    pub use kmip_ttlv;
}

mod config;
mod driver;
mod error;
mod key_management;
mod transport;

#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
#[cfg(test)]
mod tests;
