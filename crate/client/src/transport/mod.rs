//! Pipelined connection to a KMIP server.
//!
//! A [`Transport`] is a cheap handle onto an actor task that owns the
//! connection and the request queues. Responses are matched to requests in
//! strict FIFO order: the n-th message read from the server answers the n-th
//! request written.
//!
//! At most `pipeline_depth` requests are written and unanswered at any time;
//! further requests wait in a deferred queue and are written as responses
//! come back. The connection is opened by the first request. When a handshake
//! function is registered, it runs on every new connection and the requests
//! of other callers are held until it succeeds.

use std::{collections::VecDeque, mem, sync::Arc};

use futures::future::BoxFuture;
use tokio::{
    io::{AsyncWriteExt, WriteHalf},
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, error, trace, warn};

use crate::{
    config::TransportConfig,
    driver::MAXIMUM_RESPONSE_SIZE,
    error::{KmipClientError, result::KmipClientResult},
};

mod connector;
mod framing;

pub use connector::{Connector, KmipStream, TcpConnector, TlsConnector, connector_from_config};
pub use framing::read_message;

/// Largest message accepted from the server
const MAXIMUM_MESSAGE_LENGTH: usize = MAXIMUM_RESPONSE_SIZE as usize;

/// Post-connect negotiation run once per connection.
///
/// It receives a transport handle whose requests bypass the hold placed on
/// everybody else's until it completes.
pub type HandshakeFn =
    Arc<dyn Fn(Transport) -> BoxFuture<'static, KmipClientResult<()>> + Send + Sync>;

/// One connection of a transport; each reconnection gets a new identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

type Reply = oneshot::Sender<KmipClientResult<(ConnectionId, Vec<u8>)>>;

struct PendingRequest {
    bytes: Vec<u8>,
    reply: Reply,
}

enum Command {
    Send {
        request: PendingRequest,
        // set on the requests of the handshake of that connection
        handshake: Option<ConnectionId>,
    },
    End,
    Abort {
        connection: ConnectionId,
        reason: String,
    },
    RegisterHandshake(HandshakeFn),
    Stats(oneshot::Sender<PipelineStats>),
    // connection events, tagged with the connection generation
    Frame {
        generation: u64,
        bytes: Vec<u8>,
    },
    Closed {
        generation: u64,
        error: Option<String>,
    },
    HandshakeDone {
        generation: u64,
        result: KmipClientResult<()>,
    },
}

/// Snapshot of the pipeline queues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub connected: bool,
    pub connection: Option<ConnectionId>,
    /// Requests written and waiting for their response
    pub awaiting: usize,
    /// Requests waiting for room in the pipeline
    pub deferred: usize,
    /// Requests waiting for the handshake to complete
    pub held: usize,
    /// Connections opened since the transport was created
    pub connections: u64,
}

#[derive(Clone)]
pub struct Transport {
    commands: mpsc::UnboundedSender<Command>,
    handshake: Option<ConnectionId>,
}

impl Transport {
    /// Spawn the connection actor on the current tokio runtime
    #[must_use]
    pub fn new(connector: Arc<dyn Connector>, pipeline_depth: usize) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let actor = PipelineActor::new(connector, pipeline_depth.max(1), commands.downgrade());
        tokio::spawn(actor.run(receiver));
        Self {
            commands,
            handshake: None,
        }
    }

    pub fn from_config(config: &TransportConfig) -> KmipClientResult<Self> {
        Ok(Self::new(
            connector_from_config(config)?,
            config.effective_pipeline_depth(),
        ))
    }

    /// Write an encoded request and wait for the message that answers it
    pub async fn send(&self, bytes: Vec<u8>) -> KmipClientResult<Vec<u8>> {
        self.exchange(bytes).await.map(|(_, response)| response)
    }

    /// Like [`Transport::send`], also returning the connection that carried
    /// the exchange
    pub async fn exchange(&self, bytes: Vec<u8>) -> KmipClientResult<(ConnectionId, Vec<u8>)> {
        let (reply, response) = oneshot::channel();
        self.command(Command::Send {
            request: PendingRequest { bytes, reply },
            handshake: self.handshake,
        })?;
        response.await.map_err(|_e| transport_stopped())?
    }

    /// Close the connection once every queued request has been answered
    pub fn end(&self) {
        if self.command(Command::End).is_err() {
            debug!("end: transport already stopped");
        }
    }

    /// Drop `connection` now, failing every queued request.
    ///
    /// Ignored when `connection` is already gone, so that a late abort never
    /// hits the connection opened after it.
    pub fn abort_pipeline(&self, connection: ConnectionId, reason: &str) {
        let abort = Command::Abort {
            connection,
            reason: reason.to_owned(),
        };
        if self.command(abort).is_err() {
            debug!("abort: transport already stopped");
        }
    }

    /// Set the function run on each new connection
    pub fn register_handshake_function(&self, handshake: HandshakeFn) {
        if self.command(Command::RegisterHandshake(handshake)).is_err() {
            debug!("handshake registration: transport already stopped");
        }
    }

    pub async fn stats(&self) -> KmipClientResult<PipelineStats> {
        let (reply, stats) = oneshot::channel();
        self.command(Command::Stats(reply))?;
        stats.await.map_err(|_e| transport_stopped())
    }

    fn command(&self, command: Command) -> KmipClientResult<()> {
        self.commands
            .send(command)
            .map_err(|_e| transport_stopped())
    }
}

fn transport_stopped() -> KmipClientError {
    KmipClientError::Transport("the transport is stopped".to_owned())
}

struct Connection {
    writer: WriteHalf<Box<dyn KmipStream>>,
    reader: JoinHandle<()>,
    ready: bool,
}

struct PipelineActor {
    connector: Arc<dyn Connector>,
    pipeline_depth: usize,
    commands: mpsc::WeakUnboundedSender<Command>,
    handshake: Option<HandshakeFn>,
    connection: Option<Connection>,
    generation: u64,
    connections: u64,
    awaiting: VecDeque<Reply>,
    deferred: VecDeque<PendingRequest>,
    held: VecDeque<PendingRequest>,
    closing: bool,
}

impl PipelineActor {
    fn new(
        connector: Arc<dyn Connector>,
        pipeline_depth: usize,
        commands: mpsc::WeakUnboundedSender<Command>,
    ) -> Self {
        Self {
            connector,
            pipeline_depth,
            commands,
            handshake: None,
            connection: None,
            generation: 0,
            connections: 0,
            awaiting: VecDeque::new(),
            deferred: VecDeque::new(),
            held: VecDeque::new(),
            closing: false,
        }
    }

    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = receiver.recv().await {
            match command {
                Command::Send { request, handshake } => self.on_send(request, handshake).await,
                Command::End => {
                    self.closing = true;
                    self.close_if_drained().await;
                }
                Command::Abort { connection, reason } if self.is_current(connection) => {
                    error!("aborting the pipeline: {reason}");
                    self.fail_all(&KmipClientError::PipelineAborted(reason));
                    self.teardown().await;
                }
                Command::Abort { reason, .. } => {
                    debug!("ignoring an abort of a previous connection: {reason}");
                }
                Command::RegisterHandshake(handshake) => self.handshake = Some(handshake),
                Command::Stats(reply) => {
                    if reply.send(self.stats()).is_err() {
                        trace!("stats requester went away");
                    }
                }
                Command::Frame { generation, bytes } if generation == self.generation => {
                    self.on_frame(bytes).await;
                }
                Command::Closed { generation, error } if generation == self.generation => {
                    self.on_closed(error).await;
                }
                Command::HandshakeDone { generation, result } if generation == self.generation => {
                    self.on_handshake_done(result).await;
                }
                Command::Frame { .. } | Command::Closed { .. } | Command::HandshakeDone { .. } => {
                    trace!("ignoring an event of a previous connection");
                }
            }
        }
        self.teardown().await;
    }

    fn is_current(&self, connection: ConnectionId) -> bool {
        self.connection.is_some() && connection.0 == self.generation
    }

    fn stats(&self) -> PipelineStats {
        PipelineStats {
            connected: self.connection.is_some(),
            connection: self
                .connection
                .as_ref()
                .map(|_| ConnectionId(self.generation)),
            awaiting: self.awaiting.len(),
            deferred: self.deferred.len(),
            held: self.held.len(),
            connections: self.connections,
        }
    }

    async fn on_send(&mut self, request: PendingRequest, handshake: Option<ConnectionId>) {
        if let Some(connection) = handshake {
            if self.is_current(connection) {
                self.dispatch(request).await;
            } else {
                // the connection of this handshake is gone
                reply(request.reply, Err(KmipClientError::Transport(
                    "connection lost during the handshake".to_owned(),
                )));
            }
            return;
        }
        if self.connection.is_none() {
            if let Err(e) = self.connect().await {
                reply(request.reply, Err(e));
                return;
            }
        }
        if self.connection.as_ref().is_some_and(|c| c.ready) {
            self.dispatch(request).await;
        } else {
            self.held.push_back(request);
        }
    }

    async fn connect(&mut self) -> KmipClientResult<()> {
        let stream = self.connector.connect().await?;
        self.generation += 1;
        self.connections += 1;
        let generation = self.generation;
        debug!(
            "connection #{} to {} established",
            self.connections,
            self.connector.address()
        );

        let (mut read_half, writer) = tokio::io::split(stream);
        let events = self.commands.clone();
        let reader = tokio::spawn(async move {
            loop {
                let event = match read_message(&mut read_half, MAXIMUM_MESSAGE_LENGTH).await {
                    Ok(Some(bytes)) => Command::Frame { generation, bytes },
                    Ok(None) => Command::Closed {
                        generation,
                        error: None,
                    },
                    Err(e) => Command::Closed {
                        generation,
                        error: Some(e.to_string()),
                    },
                };
                let last = matches!(event, Command::Closed { .. });
                let Some(events) = events.upgrade() else {
                    break;
                };
                if events.send(event).is_err() || last {
                    break;
                }
            }
        });

        let ready = match (&self.handshake, self.commands.upgrade()) {
            (Some(handshake), Some(commands)) => {
                let handshake = handshake.clone();
                let transport = Transport {
                    commands,
                    handshake: Some(ConnectionId(generation)),
                };
                tokio::spawn(async move {
                    let result = handshake(transport.clone()).await;
                    if transport
                        .command(Command::HandshakeDone { generation, result })
                        .is_err()
                    {
                        trace!("handshake completed on a stopped transport");
                    }
                });
                false
            }
            _ => true,
        };

        self.connection = Some(Connection {
            writer,
            reader,
            ready,
        });
        Ok(())
    }

    async fn dispatch(&mut self, request: PendingRequest) {
        if self.awaiting.len() < self.pipeline_depth && self.deferred.is_empty() {
            self.write(request).await;
        } else {
            trace!("pipeline full, deferring a request");
            self.deferred.push_back(request);
        }
    }

    async fn write(&mut self, request: PendingRequest) {
        let Some(connection) = self.connection.as_mut() else {
            reply(request.reply, Err(KmipClientError::Transport(
                "not connected".to_owned(),
            )));
            return;
        };
        trace!("writing {} bytes", request.bytes.len());
        let written = match connection.writer.write_all(&request.bytes).await {
            Ok(()) => connection.writer.flush().await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => self.awaiting.push_back(request.reply),
            Err(e) => {
                let err = KmipClientError::Transport(format!("write failed: {e}"));
                reply(request.reply, Err(err.clone()));
                self.fail_all(&err);
                self.teardown().await;
            }
        }
    }

    async fn on_frame(&mut self, bytes: Vec<u8>) {
        match self.awaiting.pop_front() {
            Some(waiting) => reply(waiting, Ok((ConnectionId(self.generation), bytes))),
            None => warn!("dropping an unsolicited message of {} bytes", bytes.len()),
        }
        self.promote().await;
        self.close_if_drained().await;
    }

    /// Move deferred requests to the wire while there is room
    async fn promote(&mut self) {
        while self.awaiting.len() < self.pipeline_depth {
            let Some(request) = self.deferred.pop_front() else {
                break;
            };
            self.write(request).await;
        }
    }

    async fn on_closed(&mut self, error: Option<String>) {
        let outstanding = self.awaiting.len() + self.deferred.len() + self.held.len();
        match error {
            Some(e) => {
                warn!("connection to {} lost: {e}", self.connector.address());
                self.fail_all(&KmipClientError::Transport(format!("connection lost: {e}")));
            }
            None if outstanding > 0 => {
                warn!(
                    "connection to {} ended with {outstanding} requests outstanding",
                    self.connector.address()
                );
                self.fail_all(&KmipClientError::Transport(
                    "connection ended before all responses were received".to_owned(),
                ));
            }
            None => debug!("connection to {} closed by the server", self.connector.address()),
        }
        self.teardown().await;
    }

    async fn on_handshake_done(&mut self, result: KmipClientResult<()>) {
        match result {
            Ok(()) => {
                if let Some(connection) = self.connection.as_mut() {
                    connection.ready = true;
                }
                debug!("handshake complete, releasing {} requests", self.held.len());
                for request in mem::take(&mut self.held) {
                    self.dispatch(request).await;
                }
                self.close_if_drained().await;
            }
            Err(e) => {
                error!("handshake failed: {e}");
                let e = match e {
                    KmipClientError::Handshake(_) => e,
                    other => KmipClientError::Handshake(other.to_string()),
                };
                self.fail_all(&e);
                self.teardown().await;
            }
        }
    }

    async fn close_if_drained(&mut self) {
        if self.closing
            && self.awaiting.is_empty()
            && self.deferred.is_empty()
            && self.held.is_empty()
        {
            debug!("closing the drained connection");
            self.teardown().await;
        }
    }

    fn fail_all(&mut self, error: &KmipClientError) {
        for waiting in self.awaiting.drain(..) {
            reply(waiting, Err(error.clone()));
        }
        for request in self.deferred.drain(..).chain(self.held.drain(..)) {
            reply(request.reply, Err(error.clone()));
        }
    }

    /// Drop the connection; later events of that connection become stale
    async fn teardown(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.reader.abort();
            if let Err(e) = connection.writer.shutdown().await {
                trace!("shutdown of the connection: {e}");
            }
        }
        self.generation += 1;
        self.closing = false;
    }
}

fn reply(reply: Reply, result: KmipClientResult<(ConnectionId, Vec<u8>)>) {
    if reply.send(result).is_err() {
        trace!("the requester went away before its response");
    }
}
