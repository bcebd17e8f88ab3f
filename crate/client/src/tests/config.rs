use std::{io::Write, path::PathBuf};

use crate::{
    ClientConfig, DEFAULT_KMIP_PORT, DEFAULT_PIPELINE_DEPTH, KmipClientError, TlsConfig,
    TransportConfig, connector_from_config,
};

#[test]
fn test_minimal_configuration() {
    let config = ClientConfig::from_toml_str(
        r#"
        [transport]
        host = "kmip.example.com"
        "#,
    )
    .unwrap();
    assert_eq!(config.transport.port, DEFAULT_KMIP_PORT);
    assert_eq!(config.transport.pipeline_depth, DEFAULT_PIPELINE_DEPTH);
    assert!(config.transport.tls.is_none());
    assert_eq!(config.key_management.bucket_name_attribute_name, None);
    assert!(!config.key_management.compound_create_activate);
}

#[test]
fn test_configuration_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [transport]
        host = "10.0.0.7"
        port = 15696
        pipeline_depth = 0

        [transport.tls]
        client_certificate_pem_path = "/etc/kmip/client.pem"
        client_key_pem_path = "/etc/kmip/client.key"
        ca_certificate_pem_path = "/etc/kmip/ca.pem"
        server_name = "kmip.internal"

        [key_management]
        bucket_name_attribute_name = "x-Bucket Name"
        compound_create_activate = true
        "#
    )
    .unwrap();

    let config = ClientConfig::load(file.path()).unwrap();
    assert_eq!(config.transport.host, "10.0.0.7");
    assert_eq!(config.transport.port, 15696);
    // raised to the minimum
    assert_eq!(config.transport.pipeline_depth, 1);
    let tls = config.transport.tls.unwrap();
    assert_eq!(tls.ca_certificate_pem_path, PathBuf::from("/etc/kmip/ca.pem"));
    assert_eq!(tls.server_name.as_deref(), Some("kmip.internal"));
    assert!(!tls.accept_invalid_certs);
    assert_eq!(
        config.key_management.bucket_name_attribute_name.as_deref(),
        Some("x-Bucket Name")
    );
    assert!(config.key_management.compound_create_activate);
}

#[test]
fn test_invalid_configurations() {
    assert!(matches!(
        ClientConfig::from_toml_str("[transport]\nhost = \"\"\n"),
        Err(KmipClientError::Configuration(_))
    ));
    assert!(matches!(
        ClientConfig::from_toml_str("[transport]\nport = 5696\n"),
        Err(KmipClientError::Configuration(_))
    ));
    assert!(matches!(
        ClientConfig::load("/nonexistent/kmip.toml"),
        Err(KmipClientError::Configuration(_))
    ));
}

#[test]
fn test_missing_tls_material() {
    let config = TransportConfig::new("localhost", DEFAULT_KMIP_PORT).with_tls(TlsConfig {
        client_certificate_pem_path: PathBuf::from("/nonexistent/client.pem"),
        client_key_pem_path: PathBuf::from("/nonexistent/client.key"),
        ca_certificate_pem_path: PathBuf::from("/nonexistent/ca.pem"),
        server_name: None,
        accept_invalid_certs: false,
    });
    assert!(matches!(
        connector_from_config(&config),
        Err(KmipClientError::Tls(_))
    ));
}

#[test]
fn test_plain_tcp_connector() {
    let config = TransportConfig::new("localhost", 5697).with_pipeline_depth(0);
    assert_eq!(config.effective_pipeline_depth(), 1);
    let connector = connector_from_config(&config).unwrap();
    assert_eq!(connector.address(), "localhost:5697");
}
