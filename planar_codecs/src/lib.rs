mod lz4_codec;
mod passthrough;
mod zstd_codec;

pub use lz4_codec::Lz4Compressor;
pub use passthrough::PassThroughCompressor;
pub use zstd_codec::ZstdCompressor;

use std::sync::Arc;

use planar_core::Compressor;

/// Resolve a backend from its CLI-facing name.
///
/// The planar stream carries no codec identifier on disk, so both sides of
/// a round trip name their backend explicitly; this is the single place
/// those names are interpreted.
pub fn compressor_by_name(name: &str) -> anyhow::Result<Arc<dyn Compressor>> {
    match name {
        "zstd" | "z" => Ok(Arc::new(ZstdCompressor)),
        "lz4" | "l" => Ok(Arc::new(Lz4Compressor)),
        "passthrough" | "pass" | "none" => Ok(Arc::new(PassThroughCompressor)),
        other => anyhow::bail!(
            "unknown backend '{}'. Valid options: zstd, lz4, passthrough",
            other
        ),
    }
}
