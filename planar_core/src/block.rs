use std::io::{ErrorKind, Read};

use crate::codec::Compressor;
use crate::error::CodecError;
use crate::format::{BlockHeader, BLOCK_HEADER_SIZE};
use crate::transform::{split, unsplit};

/// Encode one chunk as a self-contained block:
/// `original_len:u32-LE  compressed_len:u32-LE  payload`.
///
/// The chunk is byte-plane split, the planar buffer handed to the backend,
/// and the result framed with its header. Blocks carry no state from their
/// neighbors — the returned bytes decode on their own.
pub fn encode_block(
    chunk: &[u8],
    compressor: &dyn Compressor,
    level: i32,
) -> Result<Vec<u8>, CodecError> {
    let planar = split(chunk);
    let payload = compressor
        .compress(&planar, level)
        .map_err(|cause| CodecError::Backend {
            name: compressor.name(),
            cause,
        })?;

    let header = BlockHeader {
        original_len: chunk.len() as u32,
        compressed_len: payload.len() as u32,
    };

    let mut block = Vec::with_capacity(BLOCK_HEADER_SIZE + payload.len());
    block.extend_from_slice(&header.to_bytes());
    block.extend_from_slice(&payload);
    Ok(block)
}

/// Decode the next block from `input`.
///
/// Returns `Ok(None)` when the stream ends cleanly at a block boundary
/// (zero header bytes available). Otherwise returns the header's
/// `original_len` together with the reconstructed chunk.
///
/// Failure modes, all fatal for the stream:
/// - 1–7 header bytes available → [`CodecError::TruncatedHeader`]
/// - payload shorter than declared → [`CodecError::TruncatedPayload`]
/// - backend rejects the payload → [`CodecError::Backend`]
/// - decompressed length ≠ `original_len` → [`CodecError::LengthMismatch`]
pub fn decode_block<R: Read>(
    input: &mut R,
    compressor: &dyn Compressor,
) -> Result<Option<(u32, Vec<u8>)>, CodecError> {
    let mut header_buf = [0u8; BLOCK_HEADER_SIZE];
    let got = read_full(input, &mut header_buf)?;
    if got == 0 {
        return Ok(None);
    }
    if got < BLOCK_HEADER_SIZE {
        return Err(CodecError::TruncatedHeader { got });
    }
    let header = BlockHeader::from_bytes(&header_buf);

    let mut payload = vec![0u8; header.compressed_len as usize];
    let got = read_full(input, &mut payload)?;
    if got < payload.len() {
        return Err(CodecError::TruncatedPayload {
            declared: header.compressed_len,
            got,
        });
    }

    let planar = compressor
        .decompress(&payload)
        .map_err(|cause| CodecError::Backend {
            name: compressor.name(),
            cause,
        })?;

    // The planar buffer is the same length as the chunk it came from, so
    // this single comparison is the unsplit-output invariant check.
    let original_len = header.original_len as usize;
    if planar.len() != original_len {
        return Err(CodecError::LengthMismatch {
            expected: original_len,
            actual: planar.len(),
        });
    }

    let chunk = unsplit(&planar, original_len);
    Ok(Some((header.original_len, chunk)))
}

/// Fill `buf` from `input`, returning how many bytes were actually read.
///
/// Unlike `read_exact`, a short count is reported rather than folded into
/// an opaque `UnexpectedEof` — the caller needs it to tell a clean end of
/// stream (0 bytes) from a truncated block (1..len bytes).
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
