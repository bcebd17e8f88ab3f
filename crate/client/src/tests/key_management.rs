use kmip_logger::log_init;
use test_kmip_server::{KmipServerHandle, ServerOptions, refused_address, start_kmip_server};

use super::{key_client, wait_until};
use crate::{
    ClientConfig, HEALTHCHECK_BUCKET_NAME, KeyManagementConfig, KmipClientError, KmipKeyClient,
    TransportConfig,
};

const BUCKET_ATTRIBUTE: &str = "x-Bucket Name";

fn configured_client(server: &KmipServerHandle, options: KeyManagementConfig) -> KmipKeyClient {
    let mut config = ClientConfig::new(TransportConfig::new("127.0.0.1", server.port()));
    config.key_management = options;
    KmipKeyClient::new(&config).unwrap()
}

async fn key_life_cycle(options: KeyManagementConfig) {
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let client = configured_client(&server, options.clone());

    let key_id = client.create_bucket_key("my-bucket").await.unwrap();
    let key = server.key(&key_id).await.unwrap();
    assert!(key.active);
    if options.bucket_name_attribute_name.is_some() {
        assert_eq!(
            key.text_attributes,
            vec![(BUCKET_ATTRIBUTE.to_owned(), "my-bucket".to_owned())]
        );
    } else {
        assert!(key.text_attributes.is_empty());
    }
    let activations = if options.compound_create_activate { 0 } else { 1 };
    assert_eq!(server.requests("Activate").await, activations);

    let plaintext: [u8; 32] = rand::random();
    let ciphertext = client.cipher_data_key(1, &key_id, &plaintext).await.unwrap();
    assert_ne!(ciphertext.as_slice(), plaintext.as_slice());
    // a full padding block is added to block-aligned input
    assert_eq!(ciphertext.len(), 48);
    let deciphered = client
        .decipher_data_key(1, &key_id, &ciphertext)
        .await
        .unwrap();
    assert_eq!(deciphered, plaintext);

    client.destroy_bucket_key(&key_id).await.unwrap();
    assert!(server.key(&key_id).await.is_none());
    assert_eq!(server.requests("Revoke").await, 1);
    assert_eq!(server.requests("Destroy").await, 1);
    client.end();
}

#[tokio::test]
async fn test_key_life_cycle() {
    log_init(None);
    for bucket_name_attribute_name in [None, Some(BUCKET_ATTRIBUTE.to_owned())] {
        for compound_create_activate in [false, true] {
            key_life_cycle(KeyManagementConfig {
                bucket_name_attribute_name: bucket_name_attribute_name.clone(),
                compound_create_activate,
            })
            .await;
        }
    }
}

#[tokio::test]
async fn test_fixed_iv_gives_deterministic_ciphertexts() {
    log_init(None);
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let client = key_client(server.addr);

    let key_id = client.create_bucket_key("bucket").await.unwrap();
    let first = client.cipher_data_key(0, &key_id, b"data key").await.unwrap();
    let second = client.cipher_data_key(0, &key_id, b"data key").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_errors_are_prefixed_with_the_operation() {
    log_init(None);
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let client = key_client(server.addr);

    let Err(KmipClientError::KeyManagement(message)) =
        client.cipher_data_key(0, "unknown", b"data key").await
    else {
        panic!("encryption with an unknown key should fail");
    };
    assert!(
        message.starts_with("KMIP::cipher_data_key: Encrypt failed: Item Not Found"),
        "{message}"
    );

    let Err(KmipClientError::KeyManagement(message)) =
        client.destroy_bucket_key("unknown").await
    else {
        panic!("destruction of an unknown key should fail");
    };
    assert!(message.starts_with("KMIP::destroy_bucket_key: Revoke failed"), "{message}");
}

#[tokio::test]
async fn test_wrong_object_type_is_rejected() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        wrong_object_type: true,
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let client = key_client(server.addr);

    let Err(KmipClientError::KeyManagement(message)) = client.create_bucket_key("bucket").await
    else {
        panic!("a Secret Data object should be rejected");
    };
    assert_eq!(
        message,
        "KMIP::create_bucket_key: Unexpected response: Server created an object of wrong type: \
         Secret Data"
    );
    assert_eq!(server.requests("Activate").await, 0);
}

#[tokio::test]
async fn test_failed_activation() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        failing_operation: Some(("Activate".to_owned(), "Permission Denied".to_owned())),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let client = key_client(server.addr);

    let Err(KmipClientError::KeyManagement(message)) = client.create_bucket_key("bucket").await
    else {
        panic!("the activation should have failed");
    };
    assert_eq!(
        message,
        "KMIP::create_bucket_key: Activate failed: Permission Denied: injected failure"
    );
}

#[tokio::test]
async fn test_healthcheck_cleans_up() {
    log_init(None);
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let client = key_client(server.addr);

    client.healthcheck().await.unwrap();
    assert_eq!(server.requests("Create").await, 1);
    wait_until(async || server.keys().await.is_empty()).await;
    assert_eq!(server.requests("Destroy").await, 1);
}

#[tokio::test]
async fn test_healthcheck_names_the_bucket() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        failing_operation: Some(("Revoke".to_owned(), "Permission Denied".to_owned())),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let mut config = ClientConfig::new(TransportConfig::new("127.0.0.1", server.port()));
    config.key_management.bucket_name_attribute_name = Some(BUCKET_ATTRIBUTE.to_owned());
    let client = KmipKeyClient::new(&config).unwrap();

    // a failed cleanup does not fail the healthcheck
    client.healthcheck().await.unwrap();
    wait_until(async || server.requests("Revoke").await == 1).await;
    let keys = server.keys().await;
    assert_eq!(keys.len(), 1);
    assert_eq!(
        keys[0].text_attributes,
        vec![(BUCKET_ATTRIBUTE.to_owned(), HEALTHCHECK_BUCKET_NAME.to_owned())]
    );
}

#[tokio::test]
async fn test_healthcheck_without_server() {
    log_init(None);
    let client = key_client(refused_address().unwrap());

    let Err(KmipClientError::KeyManagement(message)) = client.healthcheck().await else {
        panic!("the healthcheck should fail without a server");
    };
    assert!(message.starts_with("KMIP::healthcheck: "), "{message}");
    assert!(message.contains("connection"), "{message}");
}
