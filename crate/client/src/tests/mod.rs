use std::{net::SocketAddr, sync::Arc, time::Duration};

use kmip_ttlv::{Codec, Message, ttlv::TTLV};

use crate::{ClientConfig, KmipKeyClient, PipelineStats, TcpConnector, Transport, TransportConfig};

mod config;
mod handshake;
mod key_management;

fn tcp_transport(addr: SocketAddr, pipeline_depth: usize) -> Transport {
    Transport::new(
        Arc::new(TcpConnector::new(addr.ip().to_string(), addr.port())),
        pipeline_depth,
    )
}

fn key_client(addr: SocketAddr) -> KmipKeyClient {
    let config = ClientConfig::new(TransportConfig::new(addr.ip().to_string(), addr.port()));
    KmipKeyClient::new(&config).unwrap()
}

/// A small framed message carrying `n`, so echoes can be told apart
fn numbered_message(n: u32) -> Vec<u8> {
    Codec::new()
        .encode(&Message::from(TTLV::integer("Batch Count", n)))
        .unwrap()
}

/// Poll the pipeline until `done` holds, for at most five seconds
async fn wait_for_stats(transport: &Transport, done: impl Fn(&PipelineStats) -> bool) -> PipelineStats {
    for _ in 0..500 {
        let stats = transport.stats().await.unwrap();
        if done(&stats) {
            return stats;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("pipeline never reached the expected state");
}

async fn wait_until(condition: impl AsyncFn() -> bool) {
    for _ in 0..500 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never met");
}
