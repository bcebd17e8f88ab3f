use std::sync::Arc;

use async_trait::async_trait;
use rustls::{
    ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    crypto::{CryptoProvider, ring, verify_tls12_signature, verify_tls13_signature},
    pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime, pem::PemObject},
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
};
use tracing::debug;

use crate::{
    config::{TlsConfig, TransportConfig},
    error::{
        KmipClientError,
        result::{KmipClientResult, KmipClientResultHelper},
    },
};

/// A bidirectional byte stream to a KMIP server
pub trait KmipStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> KmipStream for T {}

/// Opens connections to the KMIP server
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> KmipClientResult<Box<dyn KmipStream>>;

    /// `host:port` of the server, for logs and errors
    fn address(&self) -> String;
}

/// Build the connector described by the transport configuration
pub fn connector_from_config(config: &TransportConfig) -> KmipClientResult<Arc<dyn Connector>> {
    let tcp = TcpConnector::new(config.host.clone(), config.port);
    Ok(match &config.tls {
        Some(tls) => Arc::new(TlsConnector::new(tcp, tls)?),
        None => Arc::new(tcp),
    })
}

pub struct TcpConnector {
    host: String,
    port: u16,
}

impl TcpConnector {
    #[must_use]
    pub const fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    async fn open(&self) -> KmipClientResult<TcpStream> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                KmipClientError::Transport(format!(
                    "connection to {} failed: {e}",
                    self.address()
                ))
            })?;
        stream
            .set_nodelay(true)
            .context("cannot disable Nagle's algorithm")?;
        debug!("connected to {}", self.address());
        Ok(stream)
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self) -> KmipClientResult<Box<dyn KmipStream>> {
        Ok(Box::new(self.open().await?))
    }

    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TLS with client certificate authentication
pub struct TlsConnector {
    tcp: TcpConnector,
    server_name: ServerName<'static>,
    connector: tokio_rustls::TlsConnector,
}

impl TlsConnector {
    pub fn new(tcp: TcpConnector, tls: &TlsConfig) -> KmipClientResult<Self> {
        let name = tls.server_name.clone().unwrap_or_else(|| tcp.host.clone());
        let server_name = ServerName::try_from(name)
            .map_err(|e| KmipClientError::Tls(format!("invalid server name: {e}")))?;
        let config = create_rustls_client_config(tls)?;
        Ok(Self {
            tcp,
            server_name,
            connector: tokio_rustls::TlsConnector::from(Arc::new(config)),
        })
    }
}

#[async_trait]
impl Connector for TlsConnector {
    async fn connect(&self) -> KmipClientResult<Box<dyn KmipStream>> {
        let stream = self.tcp.open().await?;
        let tls_stream = self
            .connector
            .connect(self.server_name.clone(), stream)
            .await
            .map_err(|e| {
                KmipClientError::Transport(format!(
                    "TLS handshake with {} failed: {e}",
                    self.address()
                ))
            })?;
        Ok(Box::new(tls_stream))
    }

    fn address(&self) -> String {
        self.tcp.address()
    }
}

fn create_rustls_client_config(tls: &TlsConfig) -> KmipClientResult<ClientConfig> {
    let provider = Arc::new(ring::default_provider());

    let certs = CertificateDer::pem_file_iter(&tls.client_certificate_pem_path)?
        .collect::<Result<Vec<_>, _>>()?;
    let key = PrivateKeyDer::from_pem_file(&tls.client_key_pem_path)?;

    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?;
    let builder = if tls.accept_invalid_certs {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier(provider)))
    } else {
        let mut roots = RootCertStore::empty();
        for ca in CertificateDer::pem_file_iter(&tls.ca_certificate_pem_path)? {
            roots.add(ca?)?;
        }
        builder.with_root_certificates(roots)
    };
    Ok(builder.with_client_auth_cert(certs, key)?)
}

/// Accepts any server certificate; signatures are still checked
#[derive(Debug)]
struct NoVerifier(Arc<CryptoProvider>);

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
