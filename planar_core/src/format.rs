/// Size of the fixed block header in bytes.
///   original_len:u32 + compressed_len:u32 = 4 + 4 = 8
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Default raw bytes read per chunk: 50 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 50 * 1024 * 1024;

/// Default backend compression level (zstd scale: 1 = fast, 22 = smallest).
pub const DEFAULT_LEVEL: i32 = 3;

/// Decoded representation of the 8-byte block header.
///
/// The planar stream is just `Block*` with no file-level magic, version, or
/// checksum — every block is self-describing via this header alone, so any
/// prefix of the stream that ends on a block boundary is itself a valid
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Length of the chunk before the byte-plane transform.
    pub original_len: u32,
    /// Length of the compressed payload that follows the header.
    pub compressed_len: u32,
}

impl BlockHeader {
    /// Serialize to exactly `BLOCK_HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut buf = [0u8; BLOCK_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.original_len.to_le_bytes());
        buf[4..8].copy_from_slice(&self.compressed_len.to_le_bytes());
        buf
    }

    /// Deserialize from `BLOCK_HEADER_SIZE` bytes.
    ///
    /// The format has no magic bytes, so any 8 bytes parse; validity is
    /// established downstream when the payload is read and decompressed.
    pub fn from_bytes(buf: &[u8; BLOCK_HEADER_SIZE]) -> Self {
        Self {
            original_len: u32::from_le_bytes(buf[0..4].try_into().unwrap()),
            compressed_len: u32::from_le_bytes(buf[4..8].try_into().unwrap()),
        }
    }
}
