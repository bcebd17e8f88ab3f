use std::io;

use kmip_ttlv::ttlv::wire::{TTLV_HEADER_LENGTH, padding_length};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read one complete TTLV message: the 8-byte header, then `length` bytes
/// and their padding.
///
/// Returns `None` when the peer closed the stream between two messages. A
/// header announcing more than `max_length` bytes is `InvalidData`.
pub async fn read_message<R>(reader: &mut R, max_length: usize) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0_u8; TTLV_HEADER_LENGTH];
    let mut filled = 0;
    while filled < TTLV_HEADER_LENGTH {
        let n = reader.read(&mut header[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed inside a message header",
            ));
        }
        filled += n;
    }

    let length = usize::try_from(u32::from_be_bytes([
        header[4], header[5], header[6], header[7],
    ]))
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if length > max_length {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message of {length} bytes exceeds the {max_length} bytes limit"),
        ));
    }

    let mut message = vec![0_u8; TTLV_HEADER_LENGTH + length + padding_length(length)];
    message[..TTLV_HEADER_LENGTH].copy_from_slice(&header);
    reader.read_exact(&mut message[TTLV_HEADER_LENGTH..]).await?;
    Ok(Some(message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::read_message;

    #[tokio::test]
    async fn test_split_and_coalesced_messages() {
        let first = [
            0x42, 0x00, 0x0D, 0x02, 0x00, 0x00, 0x00, 0x04, //
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        let (mut client, mut server) = tokio::io::duplex(64);
        tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            // one message over two writes, then two messages in one write
            server.write_all(&first[..5]).await.unwrap();
            server.write_all(&first[5..]).await.unwrap();
            server.write_all(&[first, first].concat()).await.unwrap();
        });

        for _ in 0..3 {
            let message = read_message(&mut client, 64).await.unwrap().unwrap();
            // 4 value bytes announced, 4 padding bytes read as well
            assert_eq!(message, first);
        }
        assert!(read_message(&mut client, 64).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_message_is_rejected() {
        let (mut client, mut server) = tokio::io::duplex(64);
        tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            server
                .write_all(&[0x42, 0x00, 0x7B, 0x01, 0xFF, 0xFF, 0xFF, 0xF0])
                .await
                .unwrap();
            server.write_all(&[0; 16]).await.unwrap();
            // keep the stream open: the header alone must be refused
            std::future::pending::<()>().await;
        });

        let err = read_message(&mut client, 256_000).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("exceeds"), "{err}");
    }
}
