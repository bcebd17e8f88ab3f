use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{KmipClientError, result::KmipClientResult};

/// IANA port of KMIP over TLS
pub const DEFAULT_KMIP_PORT: u16 = 5696;

/// Number of requests allowed in flight on a connection unless configured
pub const DEFAULT_PIPELINE_DEPTH: usize = 8;

const fn default_port() -> u16 {
    DEFAULT_KMIP_PORT
}

const fn default_pipeline_depth() -> usize {
    DEFAULT_PIPELINE_DEPTH
}

/// Where and how to reach the KMIP server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum number of unanswered requests on the connection; values
    /// below 1 are raised to 1
    #[serde(default = "default_pipeline_depth")]
    pub pipeline_depth: usize,
    /// Plain TCP when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

impl TransportConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            pipeline_depth: DEFAULT_PIPELINE_DEPTH,
            tls: None,
        }
    }

    #[must_use]
    pub fn with_pipeline_depth(mut self, pipeline_depth: usize) -> Self {
        self.pipeline_depth = pipeline_depth.max(1);
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// The pipeline depth actually enforced
    #[must_use]
    pub fn effective_pipeline_depth(&self) -> usize {
        self.pipeline_depth.max(1)
    }
}

/// TLS material, as PEM files
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub client_certificate_pem_path: PathBuf,
    pub client_key_pem_path: PathBuf,
    pub ca_certificate_pem_path: PathBuf,
    /// Name checked against the server certificate, the host by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Do not verify the server certificate (test servers only)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Options of the key management operations
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyManagementConfig {
    /// Vendor attribute carrying the bucket name on created keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name_attribute_name: Option<String>,
    /// Send the Activation Date with Create instead of a separate Activate
    #[serde(default)]
    pub compound_create_activate: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub transport: TransportConfig,
    #[serde(default)]
    pub key_management: KeyManagementConfig,
}

impl ClientConfig {
    #[must_use]
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            transport,
            key_management: KeyManagementConfig::default(),
        }
    }

    /// Read the configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> KmipClientResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KmipClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> KmipClientResult<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.transport.pipeline_depth = config.transport.effective_pipeline_depth();
        if config.transport.host.is_empty() {
            return Err(KmipClientError::Configuration(
                "the server host is empty".to_owned(),
            ));
        }
        Ok(config)
    }
}
