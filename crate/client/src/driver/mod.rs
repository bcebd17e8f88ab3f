//! KMIP request/response exchanges over a [`Transport`].
//!
//! The driver wraps operation payloads in single-item request messages,
//! checks that each response answers the request it was matched with, and
//! runs the post-connect handshake (version negotiation, extension map,
//! server information and capabilities).

use std::{
    fmt::{self, Display},
    sync::Arc,
};

use futures::FutureExt;
use kmip_ttlv::{
    Codec, Message, TtlvResult,
    ttlv::{TTLV, TTLValue},
};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::{
    error::{KmipClientError, result::KmipClientResult},
    transport::{HandshakeFn, Transport},
};

mod handshake;

/// Upper bound announced to the server for its responses
pub const MAXIMUM_RESPONSE_SIZE: u32 = 256_000;

const RESPONSE_BATCH_ITEM: &str = "Response Message/Batch Item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    pub const KMIP_1_2: Self = Self::new(1, 2);
    pub const KMIP_1_3: Self = Self::new(1, 3);
    pub const KMIP_1_4: Self = Self::new(1, 4);

    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    fn to_ttlv(self) -> TTLV {
        TTLV::structure(
            "Protocol Version",
            vec![
                TTLV::integer("Protocol Version Major", self.major),
                TTLV::integer("Protocol Version Minor", self.minor),
            ],
        )
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::KMIP_1_2
    }
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Operations and object types the server reported during the handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerCapabilities {
    pub operations: Vec<String>,
    pub object_types: Vec<String>,
}

/// A successful response, with shortcuts into its single batch item
#[derive(Debug, Clone)]
pub struct KmipResponse {
    message: Message,
}

impl KmipResponse {
    #[must_use]
    pub const fn message(&self) -> &Message {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> Message {
        self.message
    }

    /// Values at `path` inside the response payload
    #[must_use]
    pub fn payload(&self, path: &str) -> Vec<&TTLValue> {
        self.message
            .lookup(&format!("{RESPONSE_BATCH_ITEM}/Response Payload/{path}"))
    }

    pub fn payload_text(&self, path: &str) -> KmipClientResult<&str> {
        self.payload(path)
            .into_iter()
            .find_map(TTLValue::as_text)
            .ok_or_else(|| missing(path))
    }

    pub fn payload_bytes(&self, path: &str) -> KmipClientResult<&[u8]> {
        self.payload(path)
            .into_iter()
            .find_map(TTLValue::as_bytes)
            .ok_or_else(|| missing(path))
    }

    pub fn payload_enumeration(&self, path: &str) -> KmipClientResult<&str> {
        self.payload(path)
            .into_iter()
            .find_map(TTLValue::as_enumeration_name)
            .ok_or_else(|| missing(path))
    }
}

fn missing(path: &str) -> KmipClientError {
    KmipClientError::UnexpectedResponse(format!("no {path} in the response payload"))
}

pub(crate) struct DriverInner {
    transport: Transport,
    codec: RwLock<Codec>,
    protocol_version: RwLock<ProtocolVersion>,
    server_information: RwLock<Option<TTLV>>,
    capabilities: RwLock<ServerCapabilities>,
}

impl DriverInner {
    /// One request/response exchange on `transport`
    async fn request(
        &self,
        transport: &Transport,
        operation: &str,
        payload: Vec<TTLV>,
    ) -> KmipClientResult<KmipResponse> {
        let batch_item_id: [u8; 16] = rand::random();
        let version = *self.protocol_version.read().await;
        let message = Message::from(request_message(version, operation, &batch_item_id, payload));
        trace!("request:\n{message}");
        let bytes = self.codec.read().await.encode(&message)?;

        let (connection, response) = transport.exchange(bytes).await?;
        let response = self.codec.read().await.decode(&response)?;
        trace!("response:\n{response}");

        let returned_id = response
            .lookup_first(&format!("{RESPONSE_BATCH_ITEM}/Unique Batch Item ID"))
            .and_then(TTLValue::as_bytes);
        if returned_id != Some(&batch_item_id[..]) {
            let reason = "Invalid batch item ID returned";
            error!(
                "{operation}: {reason}: expected {}, got {}",
                hex::encode(batch_item_id),
                returned_id.map_or_else(|| "none".to_owned(), hex::encode)
            );
            transport.abort_pipeline(connection, reason);
            return Err(KmipClientError::Correlation(reason.to_owned()));
        }

        let returned_operation = response
            .lookup_first(&format!("{RESPONSE_BATCH_ITEM}/Operation"))
            .map(field_text);
        if returned_operation.as_deref() != Some(operation) {
            let reason = format!(
                "Operation mismatch: expected {operation}, got {}",
                returned_operation.as_deref().unwrap_or("none")
            );
            error!("{reason}");
            transport.abort_pipeline(connection, &reason);
            return Err(KmipClientError::Correlation(reason));
        }

        let status = response
            .lookup_first(&format!("{RESPONSE_BATCH_ITEM}/Result Status"))
            .map(field_text);
        if status.as_deref() != Some("Success") {
            let reason = response
                .lookup_first(&format!("{RESPONSE_BATCH_ITEM}/Result Reason"))
                .map_or_else(
                    || status.unwrap_or_else(|| "no result status".to_owned()),
                    field_text,
                );
            let message = response
                .lookup_first(&format!("{RESPONSE_BATCH_ITEM}/Result Message"))
                .and_then(TTLValue::as_text)
                .unwrap_or_default()
                .to_owned();
            debug!("{operation} failed: {reason}: {message}");
            return Err(KmipClientError::Protocol {
                operation: operation.to_owned(),
                reason,
                message,
            });
        }

        debug!("{operation} succeeded");
        Ok(KmipResponse { message: response })
    }
}

/// Enumeration name or text of a response field
fn field_text(value: &TTLValue) -> String {
    match value {
        TTLValue::Enumeration(e) => e.to_string(),
        TTLValue::TextString(s) => s.clone(),
        other => format!("{other:?}"),
    }
}

fn request_message(
    version: ProtocolVersion,
    operation: &str,
    batch_item_id: &[u8],
    payload: Vec<TTLV>,
) -> TTLV {
    TTLV::structure(
        "Request Message",
        vec![
            TTLV::structure(
                "Request Header",
                vec![
                    version.to_ttlv(),
                    TTLV::integer("Maximum Response Size", MAXIMUM_RESPONSE_SIZE),
                    TTLV::integer("Batch Count", 1),
                ],
            ),
            TTLV::structure(
                "Batch Item",
                vec![
                    TTLV::enumeration("Operation", operation),
                    TTLV::byte_string("Unique Batch Item ID", batch_item_id),
                    TTLV::structure("Request Payload", payload),
                ],
            ),
        ],
    )
}

/// Issues KMIP operations over a shared transport.
///
/// Cloning is cheap; clones share the codec, the negotiated version and the
/// connection.
#[derive(Clone)]
pub struct Driver {
    inner: Arc<DriverInner>,
}

impl Driver {
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: Arc::new(DriverInner {
                transport,
                codec: RwLock::new(Codec::new()),
                protocol_version: RwLock::new(ProtocolVersion::default()),
                server_information: RwLock::new(None),
                capabilities: RwLock::new(ServerCapabilities::default()),
            }),
        }
    }

    /// Run the KMIP handshake on every new connection of the transport
    pub fn enable_handshake(&self) {
        let driver = Arc::downgrade(&self.inner);
        let handshake: HandshakeFn = Arc::new(move |transport: Transport| {
            let driver = driver.clone();
            async move {
                let Some(inner) = driver.upgrade() else {
                    return Err(KmipClientError::Handshake("the driver is gone".to_owned()));
                };
                handshake::run(&inner, &transport).await
            }
            .boxed()
        });
        self.register_handshake_function(handshake);
    }

    pub fn register_handshake_function(&self, handshake: HandshakeFn) {
        self.inner.transport.register_handshake_function(handshake);
    }

    /// Send `operation` with its payload fields and check the response
    pub async fn request(
        &self,
        operation: &str,
        payload: Vec<TTLV>,
    ) -> KmipClientResult<KmipResponse> {
        self.inner
            .request(&self.inner.transport, operation, payload)
            .await
    }

    pub async fn change_protocol_version(&self, major: u32, minor: u32) {
        *self.inner.protocol_version.write().await = ProtocolVersion::new(major, minor);
    }

    pub async fn protocol_version(&self) -> ProtocolVersion {
        *self.inner.protocol_version.read().await
    }

    pub async fn encode_mask(&self, tag: &str, names: &[&str]) -> TtlvResult<u32> {
        self.inner.codec.read().await.encode_mask(tag, names)
    }

    pub async fn decode_mask(&self, tag: &str, mask: u32) -> Vec<String> {
        self.inner.codec.read().await.decode_mask(tag, mask)
    }

    pub async fn map_extension(&self, name: &str, code: u32) {
        self.inner.codec.write().await.map_extension(name, code);
    }

    /// `Server Information` structure returned during the last handshake
    pub async fn server_information(&self) -> Option<TTLV> {
        self.inner.server_information.read().await.clone()
    }

    pub async fn server_capabilities(&self) -> ServerCapabilities {
        self.inner.capabilities.read().await.clone()
    }

    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    /// Close the connection once pending requests are answered
    pub fn end(&self) {
        self.inner.transport.end();
    }
}
