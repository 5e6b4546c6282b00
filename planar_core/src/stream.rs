use std::io::{Read, Seek, SeekFrom, Write};
use std::time::{Duration, Instant};

use crate::block::{decode_block, encode_block};
use crate::codec::Compressor;
use crate::error::CodecError;
use crate::format::{BlockHeader, BLOCK_HEADER_SIZE};

/// Figures accumulated while compressing a stream. Observational only —
/// nothing here is part of the wire format.
#[derive(Debug, Clone)]
pub struct CompressSummary {
    /// Total raw bytes read from the input.
    pub original_bytes: u64,
    /// Total bytes written to the output, headers included.
    pub compressed_bytes: u64,
    /// Number of blocks written.
    pub blocks: u64,
    /// Wall time for the whole pass.
    pub elapsed: Duration,
}

impl CompressSummary {
    /// Compression ratio (original / compressed); 1.0 for an empty stream.
    pub fn ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            return 1.0;
        }
        self.original_bytes as f64 / self.compressed_bytes as f64
    }
}

/// Figures accumulated while decompressing a stream.
#[derive(Debug, Clone)]
pub struct DecompressSummary {
    /// Number of blocks decoded.
    pub blocks: u64,
    /// Total raw bytes written to the output.
    pub original_bytes: u64,
    /// Wall time for the whole pass.
    pub elapsed: Duration,
}

/// Compress `input` into a planar stream on `output`.
///
/// Reads up to `chunk_size` bytes at a time and emits one block per
/// non-empty read, in read order, until a read returns zero bytes. Each
/// read's *actual* byte count is that block's `original_len` — a source
/// that returns short reads produces blocks of varying size, and that is
/// part of the contract: re-filling to a uniform chunk size would change
/// the wire bytes for identical input data.
///
/// Memory use is proportional to `chunk_size` (one chunk, one planar
/// buffer, one payload resident at a time), independent of stream length.
pub fn compress_stream<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    compressor: &dyn Compressor,
    chunk_size: usize,
    level: i32,
) -> Result<CompressSummary, CodecError> {
    let start = Instant::now();
    let mut chunk = vec![0u8; chunk_size];
    let mut summary = CompressSummary {
        original_bytes: 0,
        compressed_bytes: 0,
        blocks: 0,
        elapsed: Duration::ZERO,
    };

    loop {
        let n = input.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        let block = encode_block(&chunk[..n], compressor, level)?;
        output.write_all(&block)?;

        summary.original_bytes += n as u64;
        summary.compressed_bytes += block.len() as u64;
        summary.blocks += 1;
    }

    output.flush()?;
    summary.elapsed = start.elapsed();
    Ok(summary)
}

/// Decompress a planar stream from `input` onto `output`.
///
/// Decodes blocks until the clean end of stream, writing each chunk in
/// decode order — which equals encode order, so the output is exactly the
/// original byte sequence. A stream cut mid-block surfaces as
/// `TruncatedHeader` or `TruncatedPayload`; everything already written to
/// `output` by then is a correct prefix of the original data.
pub fn decompress_stream<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    compressor: &dyn Compressor,
) -> Result<DecompressSummary, CodecError> {
    let start = Instant::now();
    let mut summary = DecompressSummary {
        blocks: 0,
        original_bytes: 0,
        elapsed: Duration::ZERO,
    };

    while let Some((_, chunk)) = decode_block(input, compressor)? {
        output.write_all(&chunk)?;
        summary.blocks += 1;
        summary.original_bytes += chunk.len() as u64;
    }

    output.flush()?;
    summary.elapsed = start.elapsed();
    Ok(summary)
}

/// Walk a stream's block headers without decompressing any payload.
///
/// Seeks over each payload instead of reading it, so inspecting a large
/// file touches only 8 bytes per block. Returns the headers in stream
/// order. Truncation anywhere in the walk is reported exactly as decoding
/// would report it.
pub fn scan_stream<R: Read + Seek>(input: &mut R) -> Result<Vec<BlockHeader>, CodecError> {
    let end = input.seek(SeekFrom::End(0))?;
    let mut pos = input.seek(SeekFrom::Start(0))?;
    let mut headers = Vec::new();

    while pos < end {
        let remaining = end - pos;
        if remaining < BLOCK_HEADER_SIZE as u64 {
            return Err(CodecError::TruncatedHeader {
                got: remaining as usize,
            });
        }
        let mut header_buf = [0u8; BLOCK_HEADER_SIZE];
        input.read_exact(&mut header_buf)?;
        let header = BlockHeader::from_bytes(&header_buf);
        pos += BLOCK_HEADER_SIZE as u64;

        let available = end - pos;
        if (header.compressed_len as u64) > available {
            return Err(CodecError::TruncatedPayload {
                declared: header.compressed_len,
                got: available as usize,
            });
        }
        pos = input.seek(SeekFrom::Start(pos + header.compressed_len as u64))?;
        headers.push(header);
    }

    Ok(headers)
}
