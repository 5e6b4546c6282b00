pub mod block;
pub mod codec;
pub mod error;
pub mod format;
pub mod stream;
pub mod transform;

pub use block::{decode_block, encode_block};
pub use codec::Compressor;
pub use error::CodecError;
pub use format::{BlockHeader, BLOCK_HEADER_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL};
pub use stream::{
    compress_stream, decompress_stream, scan_stream, CompressSummary, DecompressSummary,
};
pub use transform::{split, unsplit};
