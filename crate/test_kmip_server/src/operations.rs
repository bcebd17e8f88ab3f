use kmip_logger::{debug, warn};
use kmip_ttlv::{
    Codec, Message,
    ttlv::{TTLV, TTLValue},
};
use openssl::symm::{Cipher, decrypt, encrypt};
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::kmip_server::{KeyState, ManagedKey, ServerOptions, ServerState};

const DEFAULT_VERSIONS: [(u32, u32); 3] = [(1, 4), (1, 3), (1, 2)];

const SUPPORTED_OPERATIONS: [&str; 8] = [
    "Create",
    "Activate",
    "Revoke",
    "Destroy",
    "Query",
    "Discover Versions",
    "Encrypt",
    "Decrypt",
];

/// A failed operation: result reason and result message
type Failure = (&'static str, String);

struct Request {
    protocol_version: Option<TTLValue>,
    operation: String,
    batch_item_id: Option<Vec<u8>>,
    payload: Message,
}

impl Request {
    fn parse(message: &Message) -> Option<Self> {
        let operation = message
            .lookup_first("Request Message/Batch Item/Operation")?
            .as_enumeration_name()?
            .to_owned();
        let payload = message
            .lookup_first("Request Message/Batch Item/Request Payload")
            .and_then(TTLValue::as_structure)
            .map(<[TTLV]>::to_vec)
            .unwrap_or_default();
        Some(Self {
            protocol_version: message
                .lookup_first("Request Message/Request Header/Protocol Version")
                .cloned(),
            operation,
            batch_item_id: message
                .lookup_first("Request Message/Batch Item/Unique Batch Item ID")
                .and_then(TTLValue::as_bytes)
                .map(<[u8]>::to_vec),
            payload: Message::new(payload),
        })
    }

    fn text(&self, tag: &str) -> Result<String, Failure> {
        self.payload
            .lookup_first(tag)
            .and_then(TTLValue::as_text)
            .map(ToOwned::to_owned)
            .ok_or_else(|| ("Missing Data", format!("no {tag}")))
    }

    fn bytes(&self, tag: &str) -> Result<Vec<u8>, Failure> {
        self.payload
            .lookup_first(tag)
            .and_then(TTLValue::as_bytes)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| ("Missing Data", format!("no {tag}")))
    }

    fn enumeration(&self, path: &str) -> Option<&str> {
        self.payload
            .lookup_first(path)
            .and_then(TTLValue::as_enumeration_name)
    }
}

/// Answer one encoded request; `None` tells the caller to drop the connection
pub(crate) async fn handle_request(
    codec: &Codec,
    state: &Mutex<ServerState>,
    options: &ServerOptions,
    bytes: &[u8],
) -> Option<Vec<u8>> {
    let mut state = state.lock().await;
    state.total_requests += 1;
    if let Some(n) = options.drop_after {
        if state.total_requests > n && !state.dropped {
            state.dropped = true;
            return None;
        }
    }

    let message = match codec.decode(bytes) {
        Ok(message) => message,
        Err(e) => {
            warn!("undecodable request: {e}");
            return None;
        }
    };
    let Some(request) = Request::parse(&message) else {
        warn!("request without operation");
        return None;
    };

    let occurrence = {
        let count = state.requests.entry(request.operation.clone()).or_default();
        *count += 1;
        *count
    };
    debug!("{} #{occurrence}", request.operation);

    let outcome = match &options.failing_operation {
        Some((operation, reason)) if *operation == request.operation => Err((
            result_reason(reason),
            "injected failure".to_owned(),
        )),
        _ => execute(&mut state, options, &request),
    };

    let is_nth = |fault: &Option<(String, usize)>| {
        fault
            .as_ref()
            .is_some_and(|(operation, n)| *operation == request.operation && *n == occurrence)
    };
    let mut batch_item_id = request.batch_item_id.clone();
    if is_nth(&options.corrupt_batch_id) {
        batch_item_id = Some(rand::random::<[u8; 16]>().to_vec());
    }
    let operation = if is_nth(&options.wrong_operation) {
        if request.operation == "Query" {
            "Locate".to_owned()
        } else {
            "Query".to_owned()
        }
    } else {
        request.operation.clone()
    };

    let response = response_message(&request, operation, batch_item_id, outcome);
    match codec.encode(&Message::from(response)) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("cannot encode the response: {e}");
            None
        }
    }
}

/// Result reasons are table names; unknown ones become a general failure
fn result_reason(reason: &str) -> &'static str {
    kmip_ttlv::kmip_1_4::kmip_enumerations::enumeration_table("Result Reason")
        .and_then(|table| table.iter().find(|(name, _)| *name == reason))
        .map_or("General Failure", |&(name, _)| name)
}

fn response_message(
    request: &Request,
    operation: String,
    batch_item_id: Option<Vec<u8>>,
    outcome: Result<Vec<TTLV>, Failure>,
) -> TTLV {
    let mut header = Vec::with_capacity(3);
    if let Some(version) = &request.protocol_version {
        header.push(TTLV::new("Protocol Version", version.clone()));
    }
    header.push(TTLV::date_time("Time Stamp", OffsetDateTime::now_utc()));
    header.push(TTLV::integer("Batch Count", 1));

    let mut item = vec![TTLV::enumeration("Operation", operation)];
    if let Some(id) = batch_item_id {
        item.push(TTLV::byte_string("Unique Batch Item ID", id));
    }
    match outcome {
        Ok(payload) => {
            item.push(TTLV::enumeration("Result Status", "Success"));
            item.push(TTLV::structure("Response Payload", payload));
        }
        Err((reason, message)) => {
            debug!("{}: {reason}: {message}", request.operation);
            item.push(TTLV::enumeration("Result Status", "Operation Failed"));
            item.push(TTLV::enumeration("Result Reason", reason));
            item.push(TTLV::text_string("Result Message", message));
        }
    }

    TTLV::structure(
        "Response Message",
        vec![
            TTLV::structure("Response Header", header),
            TTLV::structure("Batch Item", item),
        ],
    )
}

fn execute(
    state: &mut ServerState,
    options: &ServerOptions,
    request: &Request,
) -> Result<Vec<TTLV>, Failure> {
    match request.operation.as_str() {
        "Discover Versions" => Ok(discover_versions(options, request)),
        "Query" => Ok(query(options, request)),
        "Create" => create(state, options, request),
        "Activate" => {
            let id = request.text("Unique Identifier")?;
            let key = find_key(state, &id)?;
            if key.state != KeyState::PreActive {
                return Err(("Permission Denied", format!("{id} is not pre-active")));
            }
            key.state = KeyState::Active;
            Ok(vec![TTLV::text_string("Unique Identifier", id)])
        }
        "Revoke" => {
            let id = request.text("Unique Identifier")?;
            if request
                .enumeration("Revocation Reason/Revocation Reason Code")
                .is_none()
            {
                return Err(("Missing Data", "no revocation reason".to_owned()));
            }
            find_key(state, &id)?.state = KeyState::Deactivated;
            Ok(vec![TTLV::text_string("Unique Identifier", id)])
        }
        "Destroy" => {
            let id = request.text("Unique Identifier")?;
            if find_key(state, &id)?.state == KeyState::Active {
                return Err(("Permission Denied", format!("{id} is active")));
            }
            state.keys.remove(&id);
            Ok(vec![TTLV::text_string("Unique Identifier", id)])
        }
        "Encrypt" | "Decrypt" => crypt(state, request),
        other => Err(("Operation Not Supported", other.to_owned())),
    }
}

fn find_key<'a>(state: &'a mut ServerState, id: &str) -> Result<&'a mut ManagedKey, Failure> {
    state
        .keys
        .get_mut(id)
        .ok_or_else(|| ("Item Not Found", id.to_owned()))
}

fn discover_versions(options: &ServerOptions, request: &Request) -> Vec<TTLV> {
    let versions = options.versions.clone().unwrap_or_else(|| {
        let majors = request
            .payload
            .lookup("Protocol Version/Protocol Version Major");
        let minors = request
            .payload
            .lookup("Protocol Version/Protocol Version Minor");
        majors
            .into_iter()
            .zip(minors)
            .filter_map(|(major, minor)| Some((major.as_integer()?, minor.as_integer()?)))
            .filter(|offered| DEFAULT_VERSIONS.contains(offered))
            .collect()
    });
    versions
        .into_iter()
        .map(|(major, minor)| {
            TTLV::structure(
                "Protocol Version",
                vec![
                    TTLV::integer("Protocol Version Major", major),
                    TTLV::integer("Protocol Version Minor", minor),
                ],
            )
        })
        .collect()
}

fn query(options: &ServerOptions, request: &Request) -> Vec<TTLV> {
    let mut payload = Vec::new();
    for function in request
        .payload
        .lookup("Query Function")
        .into_iter()
        .filter_map(TTLValue::as_enumeration_name)
    {
        match function {
            "Query Operations" => payload.extend(
                SUPPORTED_OPERATIONS
                    .iter()
                    .map(|operation| TTLV::enumeration("Operation", *operation)),
            ),
            "Query Objects" => payload.push(TTLV::enumeration("Object Type", "Symmetric Key")),
            "Query Server Information" => {
                payload.push(TTLV::text_string(
                    "Vendor Identification",
                    "test_kmip_server",
                ));
                let details = options
                    .extensions
                    .iter()
                    .map(|(name, _)| TTLV::text_string(name.as_str(), "simulated"))
                    .collect();
                payload.push(TTLV::structure("Server Information", details));
            }
            "Query Extension Map" => {
                for (name, tag) in &options.extensions {
                    payload.push(TTLV::structure(
                        "Extension Information",
                        vec![
                            TTLV::text_string("Extension Name", name.as_str()),
                            TTLV::integer("Extension Tag", *tag),
                        ],
                    ));
                }
                if options.inconsistent_extension_list {
                    payload.push(TTLV::structure(
                        "Extension Information",
                        vec![TTLV::text_string("Extension Name", "Orphan Extension")],
                    ));
                }
            }
            other => debug!("ignoring query function {other}"),
        }
    }
    payload
}

fn create(
    state: &mut ServerState,
    options: &ServerOptions,
    request: &Request,
) -> Result<Vec<TTLV>, Failure> {
    if request.enumeration("Object Type") != Some("Symmetric Key") {
        return Err(("Invalid Field", "only symmetric keys are supported".to_owned()));
    }

    let mut algorithm = None;
    let mut length = None;
    let mut activation_date = None;
    let mut text_attributes = Vec::new();
    for attribute in request
        .payload
        .lookup("Template-Attribute/Attribute")
        .into_iter()
        .filter_map(TTLValue::as_structure)
    {
        let attribute = Message::new(attribute.to_vec());
        let Some(name) = attribute
            .lookup_first("Attribute Name")
            .and_then(TTLValue::as_text)
        else {
            return Err(("Invalid Field", "attribute without name".to_owned()));
        };
        match (name, attribute.lookup_first("Attribute Value")) {
            ("Cryptographic Algorithm", Some(value)) => {
                algorithm = value.as_enumeration_name().map(ToOwned::to_owned);
            }
            ("Cryptographic Length", Some(value)) => length = value.as_integer(),
            ("Activation Date", Some(TTLValue::DateTime(date))) => activation_date = Some(*date),
            (name, Some(TTLValue::TextString(value))) => {
                text_attributes.push((name.to_owned(), value.clone()));
            }
            _ => {}
        }
    }
    if algorithm.as_deref() != Some("AES") || length != Some(256) {
        return Err(("Invalid Field", "only AES-256 keys are supported".to_owned()));
    }

    let id = hex::encode(rand::random::<[u8; 16]>());
    let key_state = match activation_date {
        Some(date) if date <= OffsetDateTime::now_utc() => KeyState::Active,
        _ => KeyState::PreActive,
    };
    state.keys.insert(
        id.clone(),
        ManagedKey {
            material: rand::random(),
            state: key_state,
            text_attributes,
        },
    );

    let object_type = if options.wrong_object_type {
        "Secret Data"
    } else {
        "Symmetric Key"
    };
    Ok(vec![
        TTLV::enumeration("Object Type", object_type),
        TTLV::text_string("Unique Identifier", id),
    ])
}

fn crypt(state: &mut ServerState, request: &Request) -> Result<Vec<TTLV>, Failure> {
    let id = request.text("Unique Identifier")?;
    let data = request.bytes("Data")?;
    let iv = request.bytes("IV/Counter/Nonce")?;
    if request.enumeration("Cryptographic Parameters/Block Cipher Mode") != Some("CBC")
        || request.enumeration("Cryptographic Parameters/Padding Method") != Some("PKCS5")
    {
        return Err(("Invalid Field", "only AES-CBC with PKCS#5 padding".to_owned()));
    }

    let key = find_key(state, &id)?;
    if key.state != KeyState::Active {
        return Err(("Permission Denied", format!("{id} is not active")));
    }

    let cipher = Cipher::aes_256_cbc();
    let result = if request.operation == "Encrypt" {
        encrypt(cipher, &key.material, Some(iv.as_slice()), &data)
    } else {
        decrypt(cipher, &key.material, Some(iv.as_slice()), &data)
    }
    .map_err(|e| ("Cryptographic Failure", e.to_string()))?;

    Ok(vec![
        TTLV::text_string("Unique Identifier", id),
        TTLV::byte_string("Data", result),
    ])
}
