use kmip_ttlv::ttlv::{TTLV, TTLValue};
use tracing::{debug, info, warn};

use super::{DriverInner, ProtocolVersion, ServerCapabilities};
use crate::{
    error::{KmipClientError, result::KmipClientResult},
    transport::Transport,
};

/// Versions offered to the server, most preferred first
const PREFERRED_VERSIONS: [ProtocolVersion; 3] = [
    ProtocolVersion::KMIP_1_4,
    ProtocolVersion::KMIP_1_3,
    ProtocolVersion::KMIP_1_2,
];

/// Operations the key management client relies on
const REQUIRED_OPERATIONS: [&str; 7] = [
    "Encrypt", "Decrypt", "Activate", "Revoke", "Create", "Destroy", "Query",
];

const REQUIRED_OBJECT_TYPE: &str = "Symmetric Key";

/// Post-connect waterfall; only the first two steps can fail it
pub(super) async fn run(driver: &DriverInner, transport: &Transport) -> KmipClientResult<()> {
    negotiate_protocol_version(driver, transport).await?;
    map_extensions(driver, transport).await?;
    query_server_information(driver, transport).await;
    query_capabilities(driver, transport).await;
    Ok(())
}

fn query(functions: &[&str]) -> Vec<TTLV> {
    functions
        .iter()
        .map(|function| TTLV::enumeration("Query Function", *function))
        .collect()
}

async fn negotiate_protocol_version(
    driver: &DriverInner,
    transport: &Transport,
) -> KmipClientResult<()> {
    let offered = PREFERRED_VERSIONS.iter().map(|v| v.to_ttlv()).collect();
    let response = driver
        .request(transport, "Discover Versions", offered)
        .await
        .map_err(|e| KmipClientError::Handshake(format!("Discover Versions: {e}")))?;

    let majors = response.payload("Protocol Version/Protocol Version Major");
    let minors = response.payload("Protocol Version/Protocol Version Minor");
    if majors.is_empty() || majors.len() != minors.len() {
        return Err(KmipClientError::Handshake(
            "No suitable protocol version".to_owned(),
        ));
    }
    let first = |values: &[&TTLValue]| values.first().and_then(|v| v.as_integer());
    let (Some(major), Some(minor)) = (first(&majors), first(&minors)) else {
        return Err(KmipClientError::Handshake(
            "No suitable protocol version".to_owned(),
        ));
    };

    let version = ProtocolVersion::new(major, minor);
    *driver.protocol_version.write().await = version;
    info!("negotiated KMIP {version}");
    Ok(())
}

async fn map_extensions(driver: &DriverInner, transport: &Transport) -> KmipClientResult<()> {
    let response = driver
        .request(transport, "Query", query(&["Query Extension Map"]))
        .await
        .map_err(|e| KmipClientError::Handshake(format!("Query Extension Map: {e}")))?;

    let names = response.payload("Extension Information/Extension Name");
    let tags = response.payload("Extension Information/Extension Tag");
    if names.len() != tags.len() {
        return Err(KmipClientError::Handshake(
            "Inconsistent extension list".to_owned(),
        ));
    }

    let mut codec = driver.codec.write().await;
    for (name, tag) in names.into_iter().zip(tags) {
        let (Some(name), Some(tag)) = (name.as_text(), tag.as_integer()) else {
            return Err(KmipClientError::Handshake(
                "Inconsistent extension list".to_owned(),
            ));
        };
        debug!("mapping extension {name} to tag 0x{tag:06x}");
        codec.map_extension(name, tag);
    }
    Ok(())
}

async fn query_server_information(driver: &DriverInner, transport: &Transport) {
    match driver
        .request(transport, "Query", query(&["Query Server Information"]))
        .await
    {
        Ok(response) => {
            let vendor = response
                .payload("Vendor Identification")
                .into_iter()
                .find_map(TTLValue::as_text)
                .unwrap_or("unknown vendor")
                .to_owned();
            info!("KMIP server: {vendor}");
            let information = response
                .payload("Server Information")
                .into_iter()
                .next()
                .cloned()
                .map(|value| TTLV::new("Server Information", value));
            *driver.server_information.write().await = information;
        }
        Err(e) => warn!("could not identify the KMIP server: {e}"),
    }
}

async fn query_capabilities(driver: &DriverInner, transport: &Transport) {
    let response = match driver
        .request(
            transport,
            "Query",
            query(&["Query Operations", "Query Objects"]),
        )
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("could not query the KMIP server capabilities: {e}");
            return;
        }
    };

    let names = |path: &str| -> Vec<String> {
        response
            .payload(path)
            .into_iter()
            .filter_map(TTLValue::as_enumeration_name)
            .map(ToOwned::to_owned)
            .collect()
    };
    let capabilities = ServerCapabilities {
        operations: names("Operation"),
        object_types: names("Object Type"),
    };

    for operation in REQUIRED_OPERATIONS {
        if !capabilities.operations.iter().any(|o| o == operation) {
            warn!("the KMIP server does not report supporting {operation}");
        }
    }
    if !capabilities
        .object_types
        .iter()
        .any(|o| o == REQUIRED_OBJECT_TYPE)
    {
        warn!("the KMIP server does not report supporting {REQUIRED_OBJECT_TYPE} objects");
    }

    *driver.capabilities.write().await = capabilities;
}
