use std::{
    io,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use kmip_logger::{debug, trace};
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::watch,
};

use crate::framing::read_request;

/// Serve connections that send every message back as received
pub async fn start_echo_server() -> io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    debug!("echo server listening on {addr}");
    tokio::spawn(async move {
        while let Ok((stream, peer)) = listener.accept().await {
            trace!("echo: client {peer} connected");
            tokio::spawn(echo(stream));
        }
    });
    Ok(addr)
}

async fn echo(mut stream: TcpStream) {
    let (mut reader, mut writer) = stream.split();
    while let Ok(Some(message)) = read_request(&mut reader).await {
        if writer.write_all(&message).await.is_err() {
            break;
        }
    }
}

/// A peer that reads requests, counts them and never answers
pub struct SilentServer {
    pub addr: SocketAddr,
    received: Arc<AtomicUsize>,
    hang_up: watch::Sender<bool>,
}

impl SilentServer {
    /// Messages read so far, over all connections
    #[must_use]
    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Close every open connection
    pub fn hang_up(&self) {
        self.hang_up.send_replace(true);
    }
}

pub async fn start_silent_server() -> io::Result<SilentServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(AtomicUsize::new(0));
    let (hang_up, hang_up_rx) = watch::channel(false);

    let counter = received.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let counter = counter.clone();
            let mut hang_up = hang_up_rx.clone();
            hang_up.mark_unchanged();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        read = read_request(&mut stream) => match read {
                            Ok(Some(_)) => {
                                counter.fetch_add(1, Ordering::SeqCst);
                            }
                            _ => break,
                        },
                        _ = hang_up.changed() => break,
                    }
                }
                trace!("silent server: closing a connection");
            });
        }
    });
    Ok(SilentServer {
        addr,
        received,
        hang_up,
    })
}
