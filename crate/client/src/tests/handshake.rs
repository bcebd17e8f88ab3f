use kmip_logger::log_init;
use kmip_ttlv::ttlv::{TTLV, TTLValue};
use test_kmip_server::{ServerOptions, start_kmip_server};

use super::tcp_transport;
use crate::{Driver, KmipClientError, ProtocolVersion};

const VENDOR_EXTENSION: &str = "x-Bucket Policy";
const VENDOR_TAG: u32 = 0x54_0001;

fn handshaking_driver(addr: std::net::SocketAddr) -> Driver {
    let driver = Driver::new(tcp_transport(addr, 4));
    driver.enable_handshake();
    driver
}

fn query_objects() -> Vec<TTLV> {
    vec![TTLV::enumeration("Query Function", "Query Objects")]
}

#[tokio::test]
async fn test_handshake_negotiates_the_best_version() {
    log_init(None);
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let driver = handshaking_driver(server.addr);

    driver.request("Query", query_objects()).await.unwrap();
    assert_eq!(driver.protocol_version().await, ProtocolVersion::KMIP_1_4);
    assert_eq!(server.requests("Discover Versions").await, 1);
    // extension map, server information, capabilities, then ours
    assert_eq!(server.requests("Query").await, 4);

    let capabilities = driver.server_capabilities().await;
    for operation in ["Create", "Activate", "Revoke", "Destroy", "Encrypt", "Decrypt"] {
        assert!(capabilities.operations.iter().any(|o| o == operation));
    }
    assert_eq!(capabilities.object_types, vec!["Symmetric Key".to_owned()]);
}

#[tokio::test]
async fn test_handshake_accepts_the_server_choice() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        versions: Some(vec![(1, 2)]),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    driver.request("Query", query_objects()).await.unwrap();
    assert_eq!(driver.protocol_version().await, ProtocolVersion::KMIP_1_2);
}

#[tokio::test]
async fn test_handshake_without_common_version() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        versions: Some(vec![]),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    let err = driver.request("Query", query_objects()).await.unwrap_err();
    assert_eq!(
        err,
        KmipClientError::Handshake("No suitable protocol version".to_owned())
    );
    // the held request never reached the server
    assert_eq!(server.requests("Query").await, 0);
    assert!(!driver.transport().stats().await.unwrap().connected);
}

#[tokio::test]
async fn test_handshake_with_inconsistent_extensions() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        extensions: vec![(VENDOR_EXTENSION.to_owned(), VENDOR_TAG)],
        inconsistent_extension_list: true,
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    assert_eq!(
        driver.request("Query", query_objects()).await.unwrap_err(),
        KmipClientError::Handshake("Inconsistent extension list".to_owned())
    );
}

#[tokio::test]
async fn test_handshake_maps_vendor_extensions() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        extensions: vec![(VENDOR_EXTENSION.to_owned(), VENDOR_TAG)],
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    driver.request("Query", query_objects()).await.unwrap();

    // the server information carries a field under the vendor tag
    let information = driver.server_information().await.unwrap();
    assert_eq!(information.tag, "Server Information");
    let TTLValue::Structure(fields) = &information.value else {
        panic!("Server Information should be a structure");
    };
    assert_eq!(
        fields,
        &vec![TTLV::text_string(VENDOR_EXTENSION, "simulated")]
    );

    // requests may now carry fields under the vendor tag
    let mut payload = query_objects();
    payload.push(TTLV::text_string(VENDOR_EXTENSION, "retain"));
    driver.request("Query", payload).await.unwrap();
}

#[tokio::test]
async fn test_vendor_tag_unknown_without_handshake() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        extensions: vec![(VENDOR_EXTENSION.to_owned(), VENDOR_TAG)],
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = Driver::new(tcp_transport(server.addr, 1));

    let mut payload = query_objects();
    payload.push(TTLV::text_string(VENDOR_EXTENSION, "retain"));
    assert!(matches!(
        driver.request("Query", payload.clone()).await,
        Err(KmipClientError::Ttlv(_))
    ));

    driver.map_extension(VENDOR_EXTENSION, VENDOR_TAG).await;
    driver.request("Query", payload).await.unwrap();
}

#[tokio::test]
async fn test_handshake_runs_on_every_connection() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        // the first Query after the handshake queries
        corrupt_batch_id: Some(("Query".to_owned(), 4)),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    assert!(matches!(
        driver.request("Query", query_objects()).await,
        Err(KmipClientError::Correlation(_))
    ));
    driver.request("Query", query_objects()).await.unwrap();
    assert_eq!(server.connections().await, 2);
    assert_eq!(server.requests("Discover Versions").await, 2);
}

#[tokio::test]
async fn test_connection_lost_during_handshake() {
    log_init(None);
    let server = start_kmip_server(ServerOptions {
        drop_after: Some(1),
        ..ServerOptions::default()
    })
    .await
    .unwrap();
    let driver = handshaking_driver(server.addr);

    assert!(matches!(
        driver.request("Query", query_objects()).await,
        Err(KmipClientError::Transport(_))
    ));
    // the server drops a single connection
    driver.request("Query", query_objects()).await.unwrap();
    assert_eq!(server.connections().await, 2);
    assert_eq!(server.requests("Discover Versions").await, 2);
}

#[tokio::test]
async fn test_held_requests_wait_for_the_handshake() {
    log_init(None);
    let server = start_kmip_server(ServerOptions::default()).await.unwrap();
    let driver = handshaking_driver(server.addr);

    let responses = futures::future::join_all((0..10).map(|_| {
        let driver = driver.clone();
        async move { driver.request("Query", query_objects()).await }
    }))
    .await;
    assert!(responses.iter().all(Result::is_ok));
    assert_eq!(server.requests("Discover Versions").await, 1);
    assert_eq!(server.requests("Query").await, 13);
    // every request was sent with the negotiated version
    for response in responses {
        let minor = response
            .unwrap()
            .message()
            .lookup_first("Response Message/Response Header/Protocol Version/Protocol Version Minor")
            .and_then(TTLValue::as_integer);
        assert_eq!(minor, Some(4));
    }
}
