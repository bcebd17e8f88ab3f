use std::{collections::HashMap, io, net::SocketAddr, sync::Arc};

use kmip_logger::{debug, info, trace, warn};
use kmip_ttlv::Codec;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::Mutex,
};

use crate::{framing::read_request, operations::handle_request};

/// Behaviour of the simulated server; the default is a well-behaved
/// KMIP 1.4 server
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Versions answered to Discover Versions; 1.4, 1.3 and 1.2 when `None`
    pub versions: Option<Vec<(u32, u32)>>,
    /// Vendor tags announced by Query Extension Map and understood in requests
    pub extensions: Vec<(String, u32)>,
    /// Announce one more extension name than extension tags
    pub inconsistent_extension_list: bool,
    /// Scramble the batch item id of the n-th (1-based) response to this operation
    pub corrupt_batch_id: Option<(String, usize)>,
    /// Answer the n-th (1-based) request of this operation as another operation
    pub wrong_operation: Option<(String, usize)>,
    /// Fail every request of this operation with this result reason
    pub failing_operation: Option<(String, String)>,
    /// Close the connection, unanswered, on the request following the n-th one
    pub drop_after: Option<usize>,
    /// Report Create as having made a Secret Data object
    pub wrong_object_type: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyState {
    PreActive,
    Active,
    Deactivated,
}

pub(crate) struct ManagedKey {
    pub(crate) material: [u8; 32],
    pub(crate) state: KeyState,
    pub(crate) text_attributes: Vec<(String, String)>,
}

/// Public view of a key held by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySnapshot {
    pub unique_identifier: String,
    pub active: bool,
    pub revoked: bool,
    /// `Text String` attributes given at creation
    pub text_attributes: Vec<(String, String)>,
}

#[derive(Default)]
pub(crate) struct ServerState {
    pub(crate) keys: HashMap<String, ManagedKey>,
    pub(crate) requests: HashMap<String, usize>,
    pub(crate) total_requests: usize,
    pub(crate) connections: usize,
    pub(crate) dropped: bool,
}

/// Handle on a running simulated server
#[derive(Clone)]
pub struct KmipServerHandle {
    pub addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl KmipServerHandle {
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Connections accepted so far
    pub async fn connections(&self) -> usize {
        self.state.lock().await.connections
    }

    /// Requests received for `operation`
    pub async fn requests(&self, operation: &str) -> usize {
        self.state
            .lock()
            .await
            .requests
            .get(operation)
            .copied()
            .unwrap_or_default()
    }

    /// Keys currently held (destroyed keys are gone)
    pub async fn keys(&self) -> Vec<KeySnapshot> {
        let state = self.state.lock().await;
        state
            .keys
            .iter()
            .map(|(id, key)| KeySnapshot {
                unique_identifier: id.clone(),
                active: key.state == KeyState::Active,
                revoked: key.state == KeyState::Deactivated,
                text_attributes: key.text_attributes.clone(),
            })
            .collect()
    }

    pub async fn key(&self, unique_identifier: &str) -> Option<KeySnapshot> {
        self.keys()
            .await
            .into_iter()
            .find(|k| k.unique_identifier == unique_identifier)
    }
}

/// Start a simulated KMIP server on a free local port
pub async fn start_kmip_server(options: ServerOptions) -> io::Result<KmipServerHandle> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!("test KMIP server listening on {addr}");

    let state = Arc::new(Mutex::new(ServerState::default()));
    let options = Arc::new(options);
    let server_state = state.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("client connected from {peer}");
                    server_state.lock().await.connections += 1;
                    let state = server_state.clone();
                    let options = options.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, &state, &options).await {
                            warn!("error handling client {peer}: {e}");
                        }
                    });
                }
                Err(e) => {
                    warn!("connection failed: {e}");
                    break;
                }
            }
        }
    });
    Ok(KmipServerHandle { addr, state })
}

async fn handle_client(
    mut stream: TcpStream,
    state: &Mutex<ServerState>,
    options: &ServerOptions,
) -> io::Result<()> {
    let mut codec = Codec::new();
    for (name, tag) in &options.extensions {
        codec.map_extension(name, *tag);
    }

    while let Some(request) = read_request(&mut stream).await? {
        trace!("received request: {}", hex::encode(&request));
        let Some(response) = handle_request(&codec, state, options, &request).await else {
            debug!("dropping the connection");
            return Ok(());
        };
        stream.write_all(&response).await?;
        stream.flush().await?;
    }
    debug!("client disconnected");
    Ok(())
}
