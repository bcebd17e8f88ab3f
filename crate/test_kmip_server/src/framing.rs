use std::io;

use kmip_ttlv::ttlv::wire::{TTLV_HEADER_LENGTH, padding_length};
use tokio::io::{AsyncRead, AsyncReadExt};

// Server side twin of the client's `read_message`: this crate cannot depend on
// kmip_client, which uses it for its tests. Requests come from the client
// under test, so their length is not capped.

/// Read one TTLV message; `None` once the client disconnected
pub(crate) async fn read_request<R>(stream: &mut R) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    // Read 8 bytes of the TTLV header
    let mut header = [0_u8; TTLV_HEADER_LENGTH];
    match stream.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let length = usize::try_from(u32::from_be_bytes([
        header[4], header[5], header[6], header[7],
    ]))
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    // Read the rest of the request
    let mut request = vec![0_u8; TTLV_HEADER_LENGTH + length + padding_length(length)];
    request[..TTLV_HEADER_LENGTH].copy_from_slice(&header);
    stream.read_exact(&mut request[TTLV_HEADER_LENGTH..]).await?;
    Ok(Some(request))
}
